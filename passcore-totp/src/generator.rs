//! RFC 6238 token generation.

use crate::error::{TotpError, TotpResult};
use crate::model::{decode_secret, TotpAlgorithm, TotpSpec, MAX_DIGITS, MIN_DIGITS};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Generates the token valid at `now_secs` (Unix seconds).
///
/// `counter = now_secs / period`, HMAC over the 8-byte big-endian counter,
/// RFC 4226 dynamic truncation, zero-padded to `digits`. Pure: the same
/// inputs always yield the same token.
pub fn generate_current_token(spec: &TotpSpec, now_secs: u64) -> TotpResult<String> {
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&spec.digits) {
        return Err(TotpError::InvalidDigits(spec.digits));
    }
    if spec.period == 0 {
        return Err(TotpError::InvalidPeriod);
    }
    let key = decode_secret(&spec.secret).ok_or(TotpError::InvalidSecret)?;

    let counter = now_secs / spec.period;
    let digest = sign(spec.algorithm, &key, &counter.to_be_bytes())?;
    let code = u64::from(truncate(&digest)) % 10u64.pow(u32::from(spec.digits));

    Ok(format!("{code:0width$}", width = usize::from(spec.digits)))
}

/// Seconds until the token at `now_secs` expires.
pub fn remaining_seconds(period: u64, now_secs: u64) -> u64 {
    if period == 0 {
        return 0;
    }
    period - now_secs % period
}

fn sign(algorithm: TotpAlgorithm, key: &[u8], message: &[u8]) -> TotpResult<Vec<u8>> {
    match algorithm {
        TotpAlgorithm::Sha1 => mac::<Hmac<Sha1>>(key, message),
        TotpAlgorithm::Sha256 => mac::<Hmac<Sha256>>(key, message),
        TotpAlgorithm::Sha512 => mac::<Hmac<Sha512>>(key, message),
    }
}

fn mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> TotpResult<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| TotpError::InvalidSecret)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// RFC 4226 section 5.3.
fn truncate(digest: &[u8]) -> u32 {
    let offset = usize::from(digest[digest.len() - 1] & 0x0f);
    (u32::from(digest[offset] & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3])
}
