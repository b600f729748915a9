//! Shares ("vaults") and how callers select among them.

use crate::ids::{ShareId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role the current user holds on a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShareRole {
    Read,
    Write,
    Admin,
}

impl ShareRole {
    /// Whether items in the share may be created or edited.
    pub fn can_write(self) -> bool {
        matches!(self, ShareRole::Write | ShareRole::Admin)
    }
}

impl fmt::Display for ShareRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareRole::Read => write!(f, "read"),
            ShareRole::Write => write!(f, "write"),
            ShareRole::Admin => write!(f, "admin"),
        }
    }
}

/// A share the current user has access to.
///
/// `user_id` is the owner of the share. `is_owned` is computed for the
/// current user: it is `true` only for vaults the user created themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub share_id: ShareId,
    pub user_id: UserId,
    pub is_owned: bool,
    pub role: ShareRole,
    pub create_time: DateTime<Utc>,
    pub name: String,
}

impl Vault {
    pub fn can_write(&self) -> bool {
        self.role.can_write()
    }
}

/// Which shares an item query should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareSelection {
    Share(ShareId),
    Shares(Vec<ShareId>),
    AllShares,
}

impl ShareSelection {
    pub fn includes(&self, share_id: &ShareId) -> bool {
        match self {
            ShareSelection::Share(id) => id == share_id,
            ShareSelection::Shares(ids) => ids.contains(share_id),
            ShareSelection::AllShares => true,
        }
    }
}
