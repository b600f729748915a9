//! Plan snapshot refresh.
//!
//! The plan comes from outside the core (usually an account API). A
//! [`PlanRefresher`] keeps the last good snapshot and replaces it only when
//! a fetch succeeds, so a flaky network never downgrades the user.

use crate::error::VaultResult;
use async_trait::async_trait;
use passcore_types::Plan;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Where fresh plan snapshots come from.
#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn fetch_plan(&self) -> VaultResult<Plan>;
}

pub struct PlanRefresher<S> {
    source: S,
    current: RwLock<Option<Plan>>,
    max_age_secs: u64,
}

impl<S: PlanSource> PlanRefresher<S> {
    pub fn new(source: S, max_age_secs: u64) -> Self {
        Self {
            source,
            current: RwLock::new(None),
            max_age_secs,
        }
    }

    /// Starts from a snapshot loaded elsewhere, e.g. from local storage.
    pub fn with_snapshot(source: S, max_age_secs: u64, plan: Plan) -> Self {
        Self {
            source,
            current: RwLock::new(Some(plan)),
            max_age_secs,
        }
    }

    pub async fn current(&self) -> Option<Plan> {
        self.current.read().await.clone()
    }

    /// Fetches a new snapshot and stores it.
    ///
    /// On failure the error is logged and returned, and the previous
    /// snapshot stays in place.
    pub async fn refresh(&self) -> VaultResult<Plan> {
        let plan = self.source.fetch_plan().await.map_err(|e| {
            warn!("plan refresh failed, keeping previous snapshot: {e}");
            e
        })?;

        debug!(
            plan = plan.plan_type.internal_name(),
            updated_at = plan.updated_at,
            "refreshed plan"
        );
        *self.current.write().await = Some(plan.clone());
        Ok(plan)
    }

    /// Whether the snapshot is missing or older than the max age at `now_secs`.
    pub async fn is_stale(&self, now_secs: i64) -> bool {
        match &*self.current.read().await {
            Some(plan) => {
                let max_age = i64::try_from(self.max_age_secs).unwrap_or(i64::MAX);
                now_secs.saturating_sub(plan.updated_at) > max_age
            }
            None => true,
        }
    }

    /// Refreshes if stale and returns whatever snapshot is current afterwards.
    pub async fn current_or_refresh(&self, now_secs: i64) -> Option<Plan> {
        if self.is_stale(now_secs).await {
            // Failure is already logged; the old snapshot is still usable.
            let _ = self.refresh().await;
        }
        self.current().await
    }
}
