//! Core configuration.

use crate::error::VaultResult;
use passcore_crypto::{derive_key, EncryptionKey, KdfParams, Salt};
use serde::{Deserialize, Serialize};

/// Configuration for the vault core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Argon2id cost used when deriving the vault key from the password.
    pub kdf: KdfParams,

    /// A plan snapshot older than this is refreshed (seconds).
    pub plan_max_age_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            kdf: KdfParams::default(),
            plan_max_age_secs: 86_400, // one day
        }
    }
}

impl CoreConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> VaultResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Derives the session key for `password` with the configured cost.
    pub fn derive_key(&self, password: &str, salt: &Salt) -> VaultResult<EncryptionKey> {
        Ok(derive_key(password, salt, &self.kdf)?)
    }
}
