//! Vault error types.

use passcore_crypto::CryptoError;
use passcore_totp::TotpError;
use passcore_types::{ItemId, ShareId};
use thiserror::Error;

pub type VaultResult<T> = Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("totp error: {0}")]
    Totp(#[from] TotpError),

    #[error("item not found: {share_id}/{item_id}")]
    NotFound { share_id: ShareId, item_id: ItemId },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("plan source failed: {0}")]
    PlanSource(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
