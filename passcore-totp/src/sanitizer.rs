use crate::error::TotpParseError;
use crate::model::{decode_secret, normalize_secret, TotpSpec};
use crate::uri::{parse_uri, to_uri};

/// Cleans up the human-readable parts of a spec.
///
/// Control characters are removed from label and issuer, then surrounding
/// whitespace is trimmed; an issuer left empty is dropped. Secret and
/// numeric parameters are untouched. Idempotent.
pub fn sanitize(spec: TotpSpec) -> TotpSpec {
    let issuer = spec
        .issuer
        .as_deref()
        .map(clean)
        .filter(|issuer| !issuer.is_empty());
    let label = clean(&spec.label);
    TotpSpec {
        issuer,
        label,
        ..spec
    }
}

/// Normalizes user input from a TOTP field into a canonical URI.
///
/// Accepts either a full `otpauth://` URI or a bare base32 secret as
/// typed or pasted by the user, which is wrapped into a default spec.
pub fn sanitize_uri(input: &str) -> Result<String, TotpParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TotpParseError::InvalidSecret);
    }
    if looks_like_uri(trimmed) {
        let spec = sanitize(parse_uri(trimmed)?);
        return Ok(to_uri(&spec));
    }

    let secret = normalize_secret(trimmed);
    if decode_secret(&secret).is_none() {
        return Err(TotpParseError::InvalidSecret);
    }
    Ok(to_uri(&TotpSpec::new(secret.as_str())))
}

fn looks_like_uri(input: &str) -> bool {
    input.contains("://")
}

fn clean(text: &str) -> String {
    let visible: String = text.chars().filter(|c| !c.is_control()).collect();
    visible.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TotpAlgorithm;
    use pretty_assertions::assert_eq;

    #[test]
    fn trims_and_strips_control_characters() {
        let spec = TotpSpec::new("JBSWY3DPEHPK3PXP")
            .with_issuer("  ACME\u{7}  ")
            .with_label("\t john\u{0}@example.com \n");
        let clean = sanitize(spec.clone());

        assert_eq!(clean.issuer.as_deref(), Some("ACME"));
        assert_eq!(clean.label, "john@example.com");
        assert_eq!(clean.secret, spec.secret);
        assert_eq!(clean.algorithm, spec.algorithm);
    }

    #[test]
    fn blank_issuer_dropped() {
        let spec = sanitize(TotpSpec::new("JBSWY3DPEHPK3PXP").with_issuer(" \u{1b} "));
        assert_eq!(spec.issuer, None);
    }

    #[test]
    fn bare_secret_becomes_default_uri() {
        let uri = sanitize_uri("  jbsw y3dp ehpk 3pxp ").unwrap();
        let spec = parse_uri(&uri).unwrap();
        assert_eq!(spec.secret.as_str(), "JBSWY3DPEHPK3PXP");
        assert_eq!(spec.algorithm, TotpAlgorithm::Sha1);
        assert_eq!(spec.digits, 6);
        assert_eq!(spec.period, 30);
    }

    #[test]
    fn uri_input_is_cleaned() {
        let uri = sanitize_uri("otpauth://totp/%20ACME%20:%20bob%20?secret=JBSWY3DPEHPK3PXP").unwrap();
        let spec = parse_uri(&uri).unwrap();
        assert_eq!(spec.issuer.as_deref(), Some("ACME"));
        assert_eq!(spec.label, "bob");
    }

    #[test]
    fn garbage_rejected() {
        assert_eq!(sanitize_uri("").unwrap_err(), TotpParseError::InvalidSecret);
        assert_eq!(sanitize_uri("not a secret!").unwrap_err(), TotpParseError::InvalidSecret);
        assert!(matches!(
            sanitize_uri("otpauth://hotp/x?secret=JBSWY3DPEHPK3PXP"),
            Err(TotpParseError::MalformedUri(_))
        ));
    }
}
