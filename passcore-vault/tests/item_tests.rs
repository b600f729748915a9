use passcore_crypto::{
    generate_random_key, CryptoError, EncryptionContext, EncryptionContextProvider, KeyVersion,
    Zeroizing,
};
use passcore_totp::{FixedClock, TotpCode, TotpError, TotpManager, TotpParseError};
use chrono::{TimeZone, Utc};
use passcore_types::{ItemId, ItemState, ItemType, ShareId, ShareSelection};
use passcore_vault::{
    current_totp, open_item, reseal_item, seal_item, InMemoryItemStore, ItemContents, ItemFields,
    ItemStore, VaultError,
};
use pretty_assertions::assert_eq;

const RFC_SHA1_URI: &str =
    "otpauth://totp/ACME:bob?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&digits=8";

fn context() -> EncryptionContext {
    EncryptionContext::new(generate_random_key(KeyVersion::INITIAL))
}

fn secret(s: &str) -> Zeroizing<String> {
    Zeroizing::new(s.to_string())
}

fn login(totp_uri: &str) -> ItemContents {
    ItemContents {
        title: "ACME".into(),
        note: secret("recovery codes in the safe"),
        fields: ItemFields::Login {
            username: "bob".into(),
            password: secret("hunter2"),
            urls: vec!["https://acme.test".into()],
            totp_uri: secret(totp_uri),
        },
    }
}

// ── Open / seal ──────────────────────────────────────────────────

#[test]
fn every_kind_survives_seal_and_open() {
    let ctx = context();
    let kinds = [
        login(RFC_SHA1_URI),
        ItemContents {
            title: "Note".into(),
            note: secret("body"),
            fields: ItemFields::Note,
        },
        ItemContents {
            title: "Alias".into(),
            note: secret(""),
            fields: ItemFields::Alias {
                alias_email: "x.y@alias.test".into(),
            },
        },
        ItemContents {
            title: "Me".into(),
            note: secret(""),
            fields: ItemFields::Identity {
                full_name: "Bob Example".into(),
                email: "bob@example.com".into(),
                phone_number: secret("+1 555 0100"),
            },
        },
        ItemContents {
            title: "Wifi".into(),
            note: secret(""),
            fields: ItemFields::Password {
                password: secret("correct horse"),
            },
        },
    ];

    for contents in kinds {
        let sealed = seal_item(&ctx, ShareId::new(), ItemId::new(), &contents).unwrap();
        assert_eq!(sealed.content.kind_name(), contents.kind_name());
        assert_eq!(open_item(&ctx, &sealed).unwrap(), contents);
    }
}

#[test]
fn secrets_are_sealed_at_rest() {
    let ctx = context();
    let item = seal_item(&ctx, ShareId::new(), ItemId::new(), &login(RFC_SHA1_URI)).unwrap();

    let json = serde_json::to_string(&item).unwrap();
    assert!(json.contains("bob"));
    assert!(!json.contains("hunter2"));
    assert!(!json.contains("GEZDGNBV"));
    assert!(!json.contains("recovery codes"));
}

#[test]
fn open_with_foreign_key_fails() {
    let item = seal_item(&context(), ShareId::new(), ItemId::new(), &login("")).unwrap();
    let err = open_item(&context(), &item).unwrap_err();
    assert!(err.is_decryption());
}

#[test]
fn contents_debug_hides_secrets() {
    let printed = format!("{:?}", login(RFC_SHA1_URI));
    assert!(printed.contains("ACME"));
    assert!(!printed.contains("hunter2"));
    assert!(!printed.contains("GEZDGNBV"));
    assert!(!printed.contains("recovery"));

    let fields = format!("{:?}", login(RFC_SHA1_URI).fields);
    assert!(fields.contains("bob"));
    assert!(!fields.contains("hunter2"));
}

// ── TOTP ─────────────────────────────────────────────────────────

#[test]
fn login_totp_code_is_generated() {
    let ctx = context();
    let item = seal_item(&ctx, ShareId::new(), ItemId::new(), &login(RFC_SHA1_URI)).unwrap();
    let totp = TotpManager::new(FixedClock(59));

    let code = current_totp(&ctx, &item, &totp).unwrap();
    assert_eq!(
        code,
        Some(TotpCode {
            code: "94287082".into(),
            remaining_seconds: 1,
            total_seconds: 30,
        })
    );
}

#[test]
fn items_without_totp_yield_none() {
    let ctx = context();
    let totp = TotpManager::new(FixedClock(0));

    let plain_login = seal_item(&ctx, ShareId::new(), ItemId::new(), &login("")).unwrap();
    assert_eq!(current_totp(&ctx, &plain_login, &totp).unwrap(), None);

    let note = seal_item(
        &ctx,
        ShareId::new(),
        ItemId::new(),
        &ItemContents {
            title: "n".into(),
            note: secret(""),
            fields: ItemFields::Note,
        },
    )
    .unwrap();
    assert!(matches!(note.content, ItemType::Note));
    assert_eq!(current_totp(&ctx, &note, &totp).unwrap(), None);
}

#[test]
fn broken_totp_uri_is_a_totp_error() {
    let ctx = context();
    let item = seal_item(
        &ctx,
        ShareId::new(),
        ItemId::new(),
        &login("otpauth://totp/x?secret=&digits=6"),
    )
    .unwrap();

    let err = current_totp(&ctx, &item, &TotpManager::new(FixedClock(0))).unwrap_err();
    assert!(matches!(
        err,
        VaultError::Totp(TotpError::Parse(TotpParseError::InvalidSecret))
    ));
}

#[test]
fn locked_vault_blocks_totp() {
    let provider = EncryptionContextProvider::new();
    provider.unlock(generate_random_key(KeyVersion::INITIAL));
    let ctx = provider.acquire().unwrap();
    let item = seal_item(&ctx, ShareId::new(), ItemId::new(), &login(RFC_SHA1_URI)).unwrap();

    provider.lock();

    let err = current_totp(&ctx, &item, &TotpManager::new(FixedClock(59))).unwrap_err();
    assert!(matches!(
        err,
        VaultError::Crypto(CryptoError::ContextInvalidated)
    ));
}

// ── Store round trip ─────────────────────────────────────────────

#[test]
fn sealed_items_round_trip_through_store() {
    let ctx = context();
    let store = InMemoryItemStore::new();
    let share = ShareId::from("personal");

    let sealed = seal_item(&ctx, share.clone(), ItemId::from("acme"), &login("")).unwrap();
    store.put(sealed).unwrap();

    let listed = store.list(&ShareSelection::Share(share.clone())).unwrap();
    assert_eq!(listed.len(), 1);
    let opened = open_item(&ctx, &listed[0]).unwrap();
    assert_eq!(opened, login(""));

    let fetched = store.get(&share, &ItemId::from("acme")).unwrap();
    assert_eq!(fetched, listed[0]);
}

#[test]
fn rotated_key_reseals_items() {
    let provider = EncryptionContextProvider::new();
    provider.unlock(generate_random_key(KeyVersion::INITIAL));
    let old = provider.acquire().unwrap();
    let item = seal_item(&old, ShareId::new(), ItemId::new(), &login(RFC_SHA1_URI)).unwrap();
    let contents = open_item(&old, &item).unwrap();

    provider
        .rotate(generate_random_key(KeyVersion::INITIAL.next()))
        .unwrap();
    let new = provider.acquire().unwrap();
    let resealed = reseal_item(&new, &item, &contents).unwrap();

    assert_eq!(open_item(&new, &resealed).unwrap(), contents);
    assert!(open_item(&new, &item).unwrap_err().is_decryption());
    assert!(matches!(
        open_item(&old, &resealed),
        Err(CryptoError::ContextInvalidated)
    ));
}

#[test]
fn reseal_keeps_state_and_creation_time() {
    let provider = EncryptionContextProvider::new();
    provider.unlock(generate_random_key(KeyVersion::INITIAL));
    let old = provider.acquire().unwrap();
    let contents = ItemContents {
        title: "recovery codes".into(),
        note: secret("1111 2222 3333"),
        fields: ItemFields::Note,
    };
    let mut item = seal_item(&old, ShareId::new(), ItemId::new(), &contents).unwrap();
    let created = Utc.timestamp_opt(1_000, 0).single().unwrap();
    item.state = ItemState::Trashed;
    item.create_time = created;
    item.modification_time = created;

    let plaintext = open_item(&old, &item).unwrap();

    provider
        .rotate(generate_random_key(KeyVersion::INITIAL.next()))
        .unwrap();
    let new = provider.acquire().unwrap();
    let resealed = reseal_item(&new, &item, &plaintext).unwrap();

    assert_eq!(resealed.id, item.id);
    assert_eq!(resealed.share_id, item.share_id);
    assert_eq!(resealed.state, ItemState::Trashed);
    assert_eq!(resealed.create_time, created);
    assert!(resealed.modification_time >= created);
    assert_eq!(open_item(&new, &resealed).unwrap(), contents);
}
