use data_encoding::BASE32_NOPAD;
use passcore_totp::{
    generate_current_token, parse_uri, sanitize, to_uri, TotpAlgorithm, TotpSpec,
};
use pretty_assertions::assert_eq;

const SHA1_SEED: &[u8] = b"12345678901234567890";
const SHA256_SEED: &[u8] = b"12345678901234567890123456789012";
const SHA512_SEED: &[u8] =
    b"1234567890123456789012345678901234567890123456789012345678901234";

/// Appendix B of RFC 6238: (time, SHA1, SHA256, SHA512).
const VECTORS: &[(u64, &str, &str, &str)] = &[
    (59, "94287082", "46119246", "90693936"),
    (1111111109, "07081804", "68084774", "25091201"),
    (1111111111, "14050471", "67062674", "99943326"),
    (1234567890, "89005924", "91819424", "93441116"),
    (2000000000, "69279037", "90698825", "38618901"),
    (20000000000, "65353130", "77737706", "47863826"),
];

fn spec(seed: &[u8], algorithm: TotpAlgorithm, digits: u8) -> TotpSpec {
    TotpSpec::new(BASE32_NOPAD.encode(seed))
        .with_algorithm(algorithm)
        .with_digits(digits)
}

// ── Reference vectors ────────────────────────────────────────────

#[test]
fn rfc6238_eight_digit_vectors() {
    let sha1 = spec(SHA1_SEED, TotpAlgorithm::Sha1, 8);
    let sha256 = spec(SHA256_SEED, TotpAlgorithm::Sha256, 8);
    let sha512 = spec(SHA512_SEED, TotpAlgorithm::Sha512, 8);

    for &(time, expected_sha1, expected_sha256, expected_sha512) in VECTORS {
        assert_eq!(generate_current_token(&sha1, time).unwrap(), expected_sha1, "SHA1 t={time}");
        assert_eq!(
            generate_current_token(&sha256, time).unwrap(),
            expected_sha256,
            "SHA256 t={time}"
        );
        assert_eq!(
            generate_current_token(&sha512, time).unwrap(),
            expected_sha512,
            "SHA512 t={time}"
        );
    }
}

#[test]
fn rfc6238_six_digit_defaults() {
    let sha1 = spec(SHA1_SEED, TotpAlgorithm::Sha1, 6);
    assert_eq!(generate_current_token(&sha1, 59).unwrap(), "287082");
    assert_eq!(generate_current_token(&sha1, 1111111109).unwrap(), "081804");

    for &(time, expected, _, _) in VECTORS {
        assert_eq!(generate_current_token(&sha1, time).unwrap(), &expected[2..]);
    }
}

#[test]
fn tokens_are_stable_within_a_period() {
    let sha1 = spec(SHA1_SEED, TotpAlgorithm::Sha1, 6);
    let at_start = generate_current_token(&sha1, 1111111080).unwrap();
    let at_end = generate_current_token(&sha1, 1111111109).unwrap();
    let next = generate_current_token(&sha1, 1111111110).unwrap();
    assert_eq!(at_start, at_end);
    assert_ne!(at_end, next);
}

#[test]
fn longer_period_changes_counter() {
    let thirty = spec(SHA1_SEED, TotpAlgorithm::Sha1, 8);
    let sixty = thirty.clone().with_period(60);
    // t=59 is counter 1 for 30s steps but counter 0 for 60s steps.
    assert_ne!(
        generate_current_token(&thirty, 59).unwrap(),
        generate_current_token(&sixty, 59).unwrap()
    );
    assert_eq!(
        generate_current_token(&sixty, 59).unwrap(),
        generate_current_token(&thirty, 29).unwrap()
    );
}

#[test]
fn parsed_uri_generates_reference_token() {
    let uri = format!(
        "otpauth://totp/Example:alice@example.com?digits=8&secret={}&algorithm=SHA256&issuer=Example",
        BASE32_NOPAD.encode(SHA256_SEED)
    );
    let spec = sanitize(parse_uri(&uri).unwrap());
    assert_eq!(generate_current_token(&spec, 1234567890).unwrap(), "91819424");
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn algorithm() -> impl Strategy<Value = TotpAlgorithm> {
        prop_oneof![
            Just(TotpAlgorithm::Sha1),
            Just(TotpAlgorithm::Sha256),
            Just(TotpAlgorithm::Sha512),
        ]
    }

    fn any_spec() -> impl Strategy<Value = TotpSpec> {
        (
            proptest::collection::vec(any::<u8>(), 1..64),
            algorithm(),
            6u8..=10,
            1u64..=300,
            proptest::option::of(".{0,24}"),
            ".{0,24}",
        )
            .prop_map(|(seed, algorithm, digits, period, issuer, label)| {
                let mut spec = TotpSpec::new(BASE32_NOPAD.encode(&seed))
                    .with_algorithm(algorithm)
                    .with_digits(digits)
                    .with_period(period)
                    .with_label(label);
                spec.issuer = issuer;
                spec
            })
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(spec in any_spec()) {
            let once = sanitize(spec);
            let twice = sanitize(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn uri_roundtrip_preserves_parameters(spec in any_spec()) {
            let parsed = parse_uri(&to_uri(&spec)).unwrap();
            prop_assert_eq!(parsed.secret.as_str(), spec.secret.as_str());
            prop_assert_eq!(parsed.algorithm, spec.algorithm);
            prop_assert_eq!(parsed.digits, spec.digits);
            prop_assert_eq!(parsed.period, spec.period);
        }

        #[test]
        fn tokens_have_requested_width(spec in any_spec(), now in any::<u64>()) {
            let token = generate_current_token(&spec, now).unwrap();
            prop_assert_eq!(token.len(), usize::from(spec.digits));
            prop_assert!(token.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
