use thiserror::Error;

/// Why an `otpauth://` URI (or bare secret) could not be turned into a
/// [`TotpSpec`](crate::TotpSpec).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotpParseError {
    #[error("malformed TOTP URI: {0}")]
    MalformedUri(String),

    #[error("TOTP secret is missing or not valid base32")]
    InvalidSecret,

    #[error("invalid TOTP parameter {name}={value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("unsupported TOTP algorithm {0:?}")]
    UnsupportedAlgorithm(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotpError {
    #[error("TOTP secret is not valid base32")]
    InvalidSecret,

    #[error("unsupported TOTP algorithm {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("TOTP digits must be between 6 and 10, got {0}")]
    InvalidDigits(u8),

    #[error("TOTP period must be positive")]
    InvalidPeriod,

    #[error(transparent)]
    Parse(#[from] TotpParseError),
}

pub type TotpResult<T> = Result<T, TotpError>;
