use crate::error::TotpError;
use data_encoding::{Encoding, BASE32_NOPAD};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use zeroize::Zeroizing;

pub const DEFAULT_DIGITS: u8 = 6;
pub const DEFAULT_PERIOD: u64 = 30;
pub const MIN_DIGITS: u8 = 6;
pub const MAX_DIGITS: u8 = 10;

/// HMAC hash used for token generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TotpAlgorithm {
    #[default]
    #[serde(rename = "SHA1")]
    Sha1,
    #[serde(rename = "SHA256")]
    Sha256,
    #[serde(rename = "SHA512")]
    Sha512,
}

impl TotpAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            TotpAlgorithm::Sha1 => "SHA1",
            TotpAlgorithm::Sha256 => "SHA256",
            TotpAlgorithm::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for TotpAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TotpAlgorithm {
    type Err = TotpError;

    /// Accepts `SHA1`, `sha-256`, `Sha512` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "SHA1" => Ok(TotpAlgorithm::Sha1),
            "SHA256" => Ok(TotpAlgorithm::Sha256),
            "SHA512" => Ok(TotpAlgorithm::Sha512),
            _ => Err(TotpError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Parameters needed to generate tokens for one account.
///
/// `secret` is the base32 text exactly as parsed; it is wiped on drop and
/// never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct TotpSpec {
    pub secret: Zeroizing<String>,
    pub algorithm: TotpAlgorithm,
    pub digits: u8,
    /// Time step in seconds.
    pub period: u64,
    pub issuer: Option<String>,
    pub label: String,
}

impl TotpSpec {
    /// A spec with the standard defaults: SHA1, 6 digits, 30 seconds.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            algorithm: TotpAlgorithm::default(),
            digits: DEFAULT_DIGITS,
            period: DEFAULT_PERIOD,
            issuer: None,
            label: String::new(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: TotpAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_digits(mut self, digits: u8) -> Self {
        self.digits = digits;
        self
    }

    pub fn with_period(mut self, period: u64) -> Self {
        self.period = period;
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl fmt::Debug for TotpSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpSpec")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .field("period", &self.period)
            .field("issuer", &self.issuer)
            .field("label", &self.label)
            .finish()
    }
}

/// Canonical form of a base32 secret: uppercase, no whitespace, dashes or
/// padding.
pub(crate) fn normalize_secret(raw: &str) -> Zeroizing<String> {
    Zeroizing::new(
        raw.chars()
            .filter(|c| !c.is_whitespace() && *c != '=' && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect(),
    )
}

/// RFC 4648 base32 without padding that ignores non-zero trailing bits.
static LENIENT_BASE32: LazyLock<Option<Encoding>> = LazyLock::new(|| {
    let mut spec = BASE32_NOPAD.specification();
    spec.check_trailing_bits = false;
    spec.encoding().ok()
});

/// Decodes a base32 secret into key bytes. `None` if it is empty or not
/// base32.
///
/// Authenticator apps accept secrets whose length is not a multiple of
/// eight, so a trailing partial group that cannot carry a whole byte is
/// dropped and leftover bits are ignored.
pub(crate) fn decode_secret(raw: &str) -> Option<Zeroizing<Vec<u8>>> {
    let normalized = normalize_secret(raw);
    let mut input = normalized.as_bytes();
    if matches!(input.len() % 8, 1 | 3 | 6) {
        input = &input[..input.len() - 1];
    }
    let bytes = LENIENT_BASE32.as_ref()?.decode(input).ok()?;
    if bytes.is_empty() {
        return None;
    }
    Some(Zeroizing::new(bytes))
}
