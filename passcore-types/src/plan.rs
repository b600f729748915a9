//! Subscription plan snapshot.
//!
//! A `Plan` is supplied by an external refresh mechanism. The core only
//! reads it to decide entitlements; it never mutates one.

use serde::{Deserialize, Serialize};

/// Subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanType {
    Free { name: String, display_name: String },
    /// Plan could not be determined (e.g. not yet fetched).
    Unknown { name: String, display_name: String },
    Trial {
        name: String,
        display_name: String,
        remaining_days: u32,
    },
    Plus { name: String, display_name: String },
    Business { name: String, display_name: String },
}

impl PlanType {
    /// Paid tiers (Plus, Business).
    pub fn is_paid(&self) -> bool {
        matches!(self, PlanType::Plus { .. } | PlanType::Business { .. })
    }

    /// Tiers that are entitled to every vault: paid tiers and trials.
    pub fn has_full_access(&self) -> bool {
        self.is_paid() || matches!(self, PlanType::Trial { .. })
    }

    pub fn internal_name(&self) -> &str {
        match self {
            PlanType::Free { name, .. }
            | PlanType::Unknown { name, .. }
            | PlanType::Trial { name, .. }
            | PlanType::Plus { name, .. }
            | PlanType::Business { name, .. } => name,
        }
    }
}

/// A numeric entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PlanLimit {
    Limited(u32),
    Unlimited,
}

impl PlanLimit {
    /// Whether `count` existing items still leave room for one more.
    pub fn allows_another(self, count: usize) -> bool {
        match self {
            PlanLimit::Limited(limit) => count < limit as usize,
            PlanLimit::Unlimited => true,
        }
    }

    /// Caps `count` at the limit.
    pub fn cap(self, count: usize) -> usize {
        match self {
            PlanLimit::Limited(limit) => count.min(limit as usize),
            PlanLimit::Unlimited => count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_type: PlanType,
    #[serde(default)]
    pub hide_upgrade: bool,
    pub vault_limit: PlanLimit,
    pub alias_limit: PlanLimit,
    pub totp_limit: PlanLimit,
    /// Unix seconds of the last successful refresh.
    pub updated_at: i64,
}
