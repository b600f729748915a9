//! Time-based one-time passwords for the passcore vault core.
//!
//! The pipeline is stateless:
//!
//! 1. [`parse_uri`] turns an `otpauth://totp/` URI into a [`TotpSpec`]
//! 2. [`sanitize`] cleans up the label and issuer
//! 3. [`generate_current_token`] computes the RFC 6238 token for a given time
//!
//! [`TotpManager`] ties the three together with a [`Clock`]. Secrets are
//! kept in zeroizing buffers and are never logged.

mod error;
mod generator;
mod manager;
mod model;
mod sanitizer;
mod uri;

pub use error::{TotpError, TotpParseError, TotpResult};
pub use generator::{generate_current_token, remaining_seconds};
pub use manager::{Clock, FixedClock, SystemClock, TotpCode, TotpManager};
pub use model::{TotpAlgorithm, TotpSpec, DEFAULT_DIGITS, DEFAULT_PERIOD, MAX_DIGITS, MIN_DIGITS};
pub use sanitizer::{sanitize, sanitize_uri};
pub use uri::{parse_uri, to_uri};
