//! Item records as they cross the persistence boundary.

use crate::ids::{ItemId, ShareId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, base64-encoded ciphertext produced by an encryption context.
///
/// The wrapped text is never plaintext, so it is safe to log and persist,
/// but `Debug` still prints only its length to keep logs compact.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedString(String);

impl EncryptedString {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for EncryptedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedString({} chars)", self.0.len())
    }
}

/// Kind-specific content of an item.
///
/// Secret fields are stored encrypted. `username` and the alias address
/// are plaintext at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemType {
    Login {
        username: String,
        password: EncryptedString,
        urls: Vec<String>,
        /// Encrypted `otpauth://` URI; the plaintext is empty when the
        /// login has no TOTP.
        totp_uri: EncryptedString,
    },
    Note,
    Alias {
        alias_email: String,
    },
    Identity {
        full_name: String,
        email: String,
        phone_number: EncryptedString,
    },
    Password {
        password: EncryptedString,
    },
}

impl ItemType {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ItemType::Login { .. } => "login",
            ItemType::Note => "note",
            ItemType::Alias { .. } => "alias",
            ItemType::Identity { .. } => "identity",
            ItemType::Password { .. } => "password",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Active,
    Trashed,
}

/// An item record, identified by `(share_id, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub share_id: ShareId,
    pub title: String,
    pub note: EncryptedString,
    pub content: ItemType,
    pub state: ItemState,
    pub create_time: DateTime<Utc>,
    pub modification_time: DateTime<Utc>,
}

impl Item {
    pub fn key(&self) -> (&ShareId, &ItemId) {
        (&self.share_id, &self.id)
    }

    pub fn is_trashed(&self) -> bool {
        self.state == ItemState::Trashed
    }
}
