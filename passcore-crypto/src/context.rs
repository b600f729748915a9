//! Scoped encryption contexts.
//!
//! An [`EncryptionContextProvider`] owns the session key between unlock and
//! lock. Callers borrow an [`EncryptionContext`] for one logical operation,
//! either through [`EncryptionContextProvider::with_encryption_context`] or
//! by holding the guard returned from [`EncryptionContextProvider::acquire`].
//!
//! Locking or rotating revokes the session: every context handed out before
//! that point fails with [`CryptoError::ContextInvalidated`] instead of
//! silently using the stale key. The key bytes are zeroized once the last
//! context referencing them is dropped.

use crate::cipher;
use crate::error::{CryptoError, CryptoResult, DecryptionError};
use crate::key::{EncryptionKey, KeyVersion};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use passcore_types::EncryptedString;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

struct SessionKey {
    key: EncryptionKey,
    revoked: AtomicBool,
}

impl SessionKey {
    fn new(key: EncryptionKey) -> Arc<Self> {
        Arc::new(Self {
            key,
            revoked: AtomicBool::new(false),
        })
    }

    fn revoke(&self) {
        self.revoked.store(true, Ordering::Release);
    }

    fn is_revoked(&self) -> bool {
        self.revoked.load(Ordering::Acquire)
    }
}

// ============================================================================
// EncryptionContext
// ============================================================================

/// Handle for encrypting and decrypting with one session key.
///
/// Cheap to clone and safe to share across threads: the key is immutable
/// and the revocation flag is atomic.
#[derive(Clone)]
pub struct EncryptionContext {
    session: Arc<SessionKey>,
}

impl EncryptionContext {
    /// A standalone context not tied to any provider.
    ///
    /// Useful for re-encryption during rotation, where both the outgoing
    /// and the incoming key are needed at once.
    pub fn new(key: EncryptionKey) -> Self {
        Self {
            session: SessionKey::new(key),
        }
    }

    fn key(&self) -> CryptoResult<&EncryptionKey> {
        if self.session.is_revoked() {
            return Err(CryptoError::ContextInvalidated);
        }
        Ok(&self.session.key)
    }

    pub fn key_version(&self) -> KeyVersion {
        self.session.key.version()
    }

    /// `false` once the session was locked or rotated away.
    pub fn is_valid(&self) -> bool {
        !self.session.is_revoked()
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        cipher::seal(self.key()?, plaintext)
    }

    /// Decrypts an authenticated ciphertext. The returned buffer is zeroized
    /// on drop.
    pub fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        Ok(cipher::open(self.key()?, ciphertext)?)
    }

    /// Runs `f` over the decrypted bytes. The plaintext never escapes the
    /// closure and is wiped afterwards, whether `f` returns or unwinds.
    pub fn with_decrypted<T>(
        &self,
        ciphertext: &[u8],
        f: impl FnOnce(&[u8]) -> T,
    ) -> CryptoResult<T> {
        let plaintext = self.decrypt(ciphertext)?;
        Ok(f(&plaintext))
    }

    pub fn encrypt_string(&self, plaintext: &str) -> CryptoResult<EncryptedString> {
        let sealed = self.encrypt(plaintext.as_bytes())?;
        Ok(EncryptedString::new(STANDARD.encode(sealed)))
    }

    pub fn decrypt_string(&self, encrypted: &EncryptedString) -> CryptoResult<Zeroizing<String>> {
        let sealed = STANDARD
            .decode(encrypted.as_str())
            .map_err(|_| DecryptionError::InvalidEncoding)?;
        let mut plaintext = self.decrypt(&sealed)?;
        match String::from_utf8(std::mem::take(&mut *plaintext)) {
            Ok(text) => Ok(Zeroizing::new(text)),
            Err(err) => {
                err.into_bytes().zeroize();
                Err(CryptoError::Encoding)
            }
        }
    }

    /// Decrypts with this context and re-seals under `target`.
    pub fn reencrypt_to(
        &self,
        target: &EncryptionContext,
        ciphertext: &[u8],
    ) -> CryptoResult<Vec<u8>> {
        let plaintext = self.decrypt(ciphertext)?;
        target.encrypt(&plaintext)
    }
}

impl fmt::Debug for EncryptionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionContext")
            .field("key_version", &self.key_version())
            .field("valid", &self.is_valid())
            .finish()
    }
}

// ============================================================================
// EncryptionContextProvider
// ============================================================================

/// Holds the session key for the current unlock.
#[derive(Default)]
pub struct EncryptionContextProvider {
    current: RwLock<Option<Arc<SessionKey>>>,
}

impl EncryptionContextProvider {
    /// Creates a locked provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `key` as the session key. Any previous session is revoked.
    pub fn unlock(&self, key: EncryptionKey) {
        let version = key.version();
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.replace(SessionKey::new(key)) {
            previous.revoke();
        }
        info!(key_version = %version, "encryption context unlocked");
    }

    /// Revokes the session. Outstanding contexts stop working.
    pub fn lock(&self) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            previous.revoke();
            info!(key_version = %previous.key.version(), "encryption context locked");
        }
    }

    /// Replaces the session key with `new_key`, which must carry a higher
    /// version than the current one.
    pub fn rotate(&self, new_key: EncryptionKey) -> CryptoResult<KeyVersion> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = current.as_ref().ok_or(CryptoError::Locked)?;
        let current_version = previous.key.version();
        let proposed = new_key.version();
        if proposed <= current_version {
            return Err(CryptoError::StaleKeyVersion {
                current: current_version,
                proposed,
            });
        }

        previous.revoke();
        *current = Some(SessionKey::new(new_key));
        info!(from = %current_version, to = %proposed, "encryption key rotated");
        Ok(proposed)
    }

    pub fn is_unlocked(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn key_version(&self) -> Option<KeyVersion> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.key.version())
    }

    /// Returns a context bound to the current session.
    pub fn acquire(&self) -> CryptoResult<EncryptionContext> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        let session = current.as_ref().ok_or(CryptoError::Locked)?;
        debug!(key_version = %session.key.version(), "encryption context acquired");
        Ok(EncryptionContext {
            session: Arc::clone(session),
        })
    }

    /// Runs `f` with a context for the current session.
    pub fn with_encryption_context<T>(
        &self,
        f: impl FnOnce(&EncryptionContext) -> T,
    ) -> CryptoResult<T> {
        let context = self.acquire()?;
        Ok(f(&context))
    }
}

impl fmt::Debug for EncryptionContextProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionContextProvider")
            .field("key_version", &self.key_version())
            .finish()
    }
}
