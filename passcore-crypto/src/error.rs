use crate::key::KeyVersion;
use thiserror::Error;

pub type CryptoResult<T> = Result<T, CryptoError>;

/// Why a ciphertext was rejected.
///
/// Decryption is all-or-nothing: every variant means no plaintext was
/// produced. Retrying with the same key fails identically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecryptionError {
    #[error("ciphertext truncated ({len} bytes)")]
    Truncated { len: usize },

    #[error("unsupported ciphertext format 0x{0:02x}")]
    UnsupportedFormat(u8),

    #[error("ciphertext was sealed with key version {found}, context holds {expected}")]
    KeyVersionMismatch {
        expected: KeyVersion,
        found: KeyVersion,
    },

    #[error("authentication failed (wrong key or tampered data)")]
    AuthenticationFailed,

    #[error("ciphertext is not valid base64")]
    InvalidEncoding,
}

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("decryption failed: {0}")]
    Decryption(#[from] DecryptionError),

    /// The context outlived the session it was acquired from.
    #[error("encryption context invalidated (vault locked or key rotated)")]
    ContextInvalidated,

    #[error("no encryption key available (vault locked)")]
    Locked,

    #[error("key version {proposed} does not follow current version {current}")]
    StaleKeyVersion {
        current: KeyVersion,
        proposed: KeyVersion,
    },

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("decrypted data is not valid UTF-8")]
    Encoding,
}

impl CryptoError {
    /// Whether the error came from rejecting a ciphertext.
    pub fn is_decryption(&self) -> bool {
        matches!(self, CryptoError::Decryption(_))
    }
}
