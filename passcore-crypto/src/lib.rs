//! Encryption layer for the passcore vault core.
//!
//! Provides per-session authenticated encryption using:
//! - Argon2id for deriving the vault key from the master password
//! - ChaCha20-Poly1305 for sealing secret item fields
//! - Zeroization of keys and decrypted buffers
//!
//! # Architecture
//!
//! Nothing outside this crate ever sees raw key bytes. On unlock the key is
//! handed to an [`EncryptionContextProvider`]; consumers borrow an
//! [`EncryptionContext`] for the duration of one operation (decrypt an item
//! for display, fill an autofill dataset) and drop it afterwards.
//!
//! Locking the vault or rotating the key revokes the session, so a context
//! kept around past its scope fails loudly with
//! [`CryptoError::ContextInvalidated`].
//!
//! Every ciphertext records the version of the key that sealed it. Opening
//! it with another key version, a truncated buffer, or a modified byte is
//! reported as a [`DecryptionError`]; no partial plaintext is ever returned.

mod cipher;
mod context;
mod error;
mod key;

pub use cipher::{sealed_key_version, FORMAT_V1, HEADER_SIZE, MIN_CIPHERTEXT_SIZE, NONCE_SIZE, TAG_SIZE};
pub use context::{EncryptionContext, EncryptionContextProvider};
pub use error::{CryptoError, CryptoResult, DecryptionError};
pub use key::{
    derive_key, generate_random_key, EncryptionKey, KdfParams, KeyVersion, Salt, KEY_SIZE,
    SALT_SIZE,
};
pub use zeroize::Zeroizing;
