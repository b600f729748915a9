//! Clock-driven façade over parser, sanitizer and generator.

use crate::error::{TotpParseError, TotpResult};
use crate::generator::{generate_current_token, remaining_seconds};
use crate::model::TotpSpec;
use crate::sanitizer::{sanitize, sanitize_uri};
use crate::uri::parse_uri;
use chrono::Utc;
use tracing::debug;

/// Source of the current Unix time in seconds.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> u64 {
        u64::try_from(Utc::now().timestamp()).unwrap_or(0)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_secs(&self) -> u64 {
        self.0
    }
}

/// A token together with its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpCode {
    pub code: String,
    pub remaining_seconds: u64,
    pub total_seconds: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TotpManager<C = SystemClock> {
    clock: C,
}

impl<C: Clock> TotpManager<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Parses and sanitizes a stored URI.
    pub fn parse(&self, uri: &str) -> Result<TotpSpec, TotpParseError> {
        parse_uri(uri).map(sanitize)
    }

    pub fn sanitize_uri(&self, input: &str) -> Result<String, TotpParseError> {
        sanitize_uri(input)
    }

    /// Current code for a stored `otpauth://` URI.
    pub fn generate(&self, uri: &str) -> TotpResult<TotpCode> {
        let spec = self.parse(uri)?;
        self.generate_for(&spec)
    }

    pub fn generate_for(&self, spec: &TotpSpec) -> TotpResult<TotpCode> {
        let now = self.clock.now_secs();
        let code = generate_current_token(spec, now)?;
        let remaining = remaining_seconds(spec.period, now);
        debug!(remaining, period = spec.period, "generated TOTP code");
        Ok(TotpCode {
            code,
            remaining_seconds: remaining,
            total_seconds: spec.period,
        })
    }
}
