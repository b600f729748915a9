//! `otpauth://totp/` URI parsing and serialization.

use crate::error::TotpParseError;
use crate::model::{
    decode_secret, normalize_secret, TotpAlgorithm, TotpSpec, MAX_DIGITS, MIN_DIGITS,
};
use url::Url;

const SCHEME: &str = "otpauth";
const OTP_TYPE: &str = "totp";

/// Parses an `otpauth://totp/{label}?secret=..` URI.
///
/// Parameters may appear in any order; missing optional ones fall back to
/// SHA1, 6 digits and a 30 second period. A label of the form
/// `Issuer:account` supplies the issuer when no `issuer` parameter is given.
pub fn parse_uri(uri: &str) -> Result<TotpSpec, TotpParseError> {
    let uri = uri.trim();
    let url = Url::parse(uri).map_err(|e| TotpParseError::MalformedUri(e.to_string()))?;

    if !url.scheme().eq_ignore_ascii_case(SCHEME) {
        return Err(TotpParseError::MalformedUri(format!(
            "unexpected scheme {:?}",
            url.scheme()
        )));
    }
    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case(OTP_TYPE) => {}
        other => {
            return Err(TotpParseError::MalformedUri(format!(
                "unsupported otp type {:?}",
                other.unwrap_or_default()
            )));
        }
    }

    let (label_issuer, label) = split_label(raw_label(uri))?;

    let mut secret = None;
    let mut issuer = None;
    let mut algorithm = TotpAlgorithm::default();
    let mut spec_digits = None;
    let mut spec_period = None;

    for (key, value) in url.query_pairs() {
        match key.to_ascii_lowercase().as_str() {
            "secret" => secret = Some(normalize_secret(&value)),
            "issuer" => issuer = Some(value.into_owned()),
            "algorithm" => {
                algorithm = value
                    .parse()
                    .map_err(|_| TotpParseError::UnsupportedAlgorithm(value.to_string()))?;
            }
            "digits" => spec_digits = Some(parse_digits(&value)?),
            "period" => spec_period = Some(parse_period(&value)?),
            _ => {}
        }
    }

    let secret = secret.ok_or(TotpParseError::InvalidSecret)?;
    if decode_secret(&secret).is_none() {
        return Err(TotpParseError::InvalidSecret);
    }

    let mut spec = TotpSpec::new(String::new()).with_algorithm(algorithm).with_label(label);
    spec.secret = secret;
    if let Some(digits) = spec_digits {
        spec.digits = digits;
    }
    if let Some(period) = spec_period {
        spec.period = period;
    }
    spec.issuer = issuer.or(label_issuer);
    Ok(spec)
}

/// Serializes a spec into an `otpauth://totp/` URI.
///
/// Every parameter is written explicitly so the result parses back to the
/// same secret, algorithm, digits and period.
pub fn to_uri(spec: &TotpSpec) -> String {
    let mut uri = format!("{SCHEME}://{OTP_TYPE}/");
    if let Some(issuer) = &spec.issuer {
        uri.push_str(&urlencoding::encode(issuer));
        uri.push(':');
    }
    uri.push_str(&urlencoding::encode(&spec.label));
    uri.push_str("?secret=");
    uri.push_str(&normalize_secret(&spec.secret));
    if let Some(issuer) = &spec.issuer {
        uri.push_str("&issuer=");
        uri.push_str(&urlencoding::encode(issuer));
    }
    uri.push_str(&format!(
        "&algorithm={}&digits={}&period={}",
        spec.algorithm, spec.digits, spec.period
    ));
    uri
}

/// The label exactly as written in `uri`.
///
/// `Url::path` resolves `.` and `..` segments (encoded or not), which would
/// erase labels consisting of dots, so the label is cut from the input.
fn raw_label(uri: &str) -> &str {
    let rest = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    rest.split_once('/').map_or("", |(_, path)| path)
}

/// Splits the raw (still percent-encoded) label on its first literal colon.
/// Encoded colons belong to the text, not the separator.
fn split_label(raw: &str) -> Result<(Option<String>, String), TotpParseError> {
    let decode = |part: &str| {
        urlencoding::decode(part)
            .map(|s| s.into_owned())
            .map_err(|_| TotpParseError::MalformedUri("label is not valid UTF-8".into()))
    };
    match raw.split_once(':') {
        Some((issuer, account)) => Ok((Some(decode(issuer)?), decode(account)?)),
        None => Ok((None, decode(raw)?)),
    }
}

fn parse_digits(value: &str) -> Result<u8, TotpParseError> {
    let invalid = || TotpParseError::InvalidParameter {
        name: "digits",
        value: value.to_string(),
    };
    let digits: u8 = value.trim().parse().map_err(|_| invalid())?;
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
        return Err(invalid());
    }
    Ok(digits)
}

fn parse_period(value: &str) -> Result<u64, TotpParseError> {
    let invalid = || TotpParseError::InvalidParameter {
        name: "period",
        value: value.to_string(),
    };
    let period: u64 = value.trim().parse().map_err(|_| invalid())?;
    if period == 0 {
        return Err(invalid());
    }
    Ok(period)
}
