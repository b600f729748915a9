//! Ciphertext framing and ChaCha20-Poly1305 sealing.
//!
//! Layout: `format (1) | key version (4, BE) | nonce (12) | ciphertext | tag (16)`.
//! The 5-byte header is bound as associated data.

use crate::error::{CryptoError, CryptoResult, DecryptionError};
use crate::key::{EncryptionKey, KeyVersion};
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use zeroize::Zeroizing;

pub const FORMAT_V1: u8 = 0x01;
pub const HEADER_SIZE: usize = 1 + 4;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;
/// Smallest valid ciphertext (empty plaintext).
pub const MIN_CIPHERTEXT_SIZE: usize = HEADER_SIZE + NONCE_SIZE + TAG_SIZE;

fn header(version: KeyVersion) -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    out[0] = FORMAT_V1;
    out[1..].copy_from_slice(&version.0.to_be_bytes());
    out
}

pub(crate) fn seal(key: &EncryptionKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    let header = header(key.version());

    let sealed = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: &header,
            },
        )
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut out = Vec::with_capacity(HEADER_SIZE + NONCE_SIZE + sealed.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(nonce.as_slice());
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Reads the key version a ciphertext claims without decrypting it.
pub fn sealed_key_version(data: &[u8]) -> Result<KeyVersion, DecryptionError> {
    if data.len() < MIN_CIPHERTEXT_SIZE {
        return Err(DecryptionError::Truncated { len: data.len() });
    }
    if data[0] != FORMAT_V1 {
        return Err(DecryptionError::UnsupportedFormat(data[0]));
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&data[1..HEADER_SIZE]);
    Ok(KeyVersion(u32::from_be_bytes(version)))
}

pub(crate) fn open(
    key: &EncryptionKey,
    data: &[u8],
) -> Result<Zeroizing<Vec<u8>>, DecryptionError> {
    let found = sealed_key_version(data)?;
    if found != key.version() {
        return Err(DecryptionError::KeyVersionMismatch {
            expected: key.version(),
            found,
        });
    }

    let (header, rest) = data.split_at(HEADER_SIZE);
    let (nonce, sealed) = rest.split_at(NONCE_SIZE);

    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()));
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: sealed,
                aad: header,
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| DecryptionError::AuthenticationFailed)
}
