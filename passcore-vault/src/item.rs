//! Opening and sealing item records.
//!
//! [`open_item`] turns a persisted [`Item`] into [`ItemContents`], the
//! transient plaintext model. Every secret in it lives in a zeroizing
//! buffer, so it is wiped as soon as the caller drops it. [`seal_item`]
//! creates a new record from contents; [`reseal_item`] writes contents back
//! over an existing record and keeps its identity, state and creation
//! time. All of them need an [`EncryptionContext`]; none keeps one.

use crate::error::VaultResult;
use chrono::Utc;
use passcore_crypto::{CryptoResult, EncryptionContext};
use passcore_totp::{Clock, TotpCode, TotpManager};
use passcore_types::{EncryptedString, Item, ItemId, ItemState, ItemType, ShareId};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// Decrypted, kind-specific fields of an item.
#[derive(Clone, PartialEq, Eq)]
pub enum ItemFields {
    Login {
        username: String,
        password: Zeroizing<String>,
        urls: Vec<String>,
        /// Empty when the login has no TOTP.
        totp_uri: Zeroizing<String>,
    },
    Note,
    Alias {
        alias_email: String,
    },
    Identity {
        full_name: String,
        email: String,
        phone_number: Zeroizing<String>,
    },
    Password {
        password: Zeroizing<String>,
    },
}

/// Plaintext view of one item, valid for a single operation.
#[derive(Clone, PartialEq, Eq)]
pub struct ItemContents {
    pub title: String,
    pub note: Zeroizing<String>,
    pub fields: ItemFields,
}

impl ItemContents {
    pub fn kind_name(&self) -> &'static str {
        match self.fields {
            ItemFields::Login { .. } => "login",
            ItemFields::Note => "note",
            ItemFields::Alias { .. } => "alias",
            ItemFields::Identity { .. } => "identity",
            ItemFields::Password { .. } => "password",
        }
    }
}

impl fmt::Debug for ItemContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContents")
            .field("title", &self.title)
            .field("kind", &self.kind_name())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ItemFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFields::Login { username, urls, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("urls", urls)
                .finish_non_exhaustive(),
            ItemFields::Note => f.write_str("Note"),
            ItemFields::Alias { alias_email } => f
                .debug_struct("Alias")
                .field("alias_email", alias_email)
                .finish(),
            ItemFields::Identity {
                full_name, email, ..
            } => f
                .debug_struct("Identity")
                .field("full_name", full_name)
                .field("email", email)
                .finish_non_exhaustive(),
            ItemFields::Password { .. } => f.debug_struct("Password").finish_non_exhaustive(),
        }
    }
}

/// Decrypts every secret field of `item`.
pub fn open_item(context: &EncryptionContext, item: &Item) -> CryptoResult<ItemContents> {
    let fields = match &item.content {
        ItemType::Login {
            username,
            password,
            urls,
            totp_uri,
        } => ItemFields::Login {
            username: username.clone(),
            password: context.decrypt_string(password)?,
            urls: urls.clone(),
            totp_uri: context.decrypt_string(totp_uri)?,
        },
        ItemType::Note => ItemFields::Note,
        ItemType::Alias { alias_email } => ItemFields::Alias {
            alias_email: alias_email.clone(),
        },
        ItemType::Identity {
            full_name,
            email,
            phone_number,
        } => ItemFields::Identity {
            full_name: full_name.clone(),
            email: email.clone(),
            phone_number: context.decrypt_string(phone_number)?,
        },
        ItemType::Password { password } => ItemFields::Password {
            password: context.decrypt_string(password)?,
        },
    };

    Ok(ItemContents {
        title: item.title.clone(),
        note: context.decrypt_string(&item.note)?,
        fields,
    })
}

/// Encrypts `contents` into a new active item record stamped with the
/// current time.
pub fn seal_item(
    context: &EncryptionContext,
    share_id: ShareId,
    item_id: ItemId,
    contents: &ItemContents,
) -> CryptoResult<Item> {
    let (note, content) = seal_fields(context, contents)?;
    let now = Utc::now();
    Ok(Item {
        id: item_id,
        share_id,
        title: contents.title.clone(),
        note,
        content,
        state: ItemState::Active,
        create_time: now,
        modification_time: now,
    })
}

/// Re-encrypts `contents` in place of an existing record.
///
/// Identity, state and `create_time` come from `existing`; only
/// `modification_time` moves. Used for edits and for re-sealing records
/// under a rotated key.
pub fn reseal_item(
    context: &EncryptionContext,
    existing: &Item,
    contents: &ItemContents,
) -> CryptoResult<Item> {
    let (note, content) = seal_fields(context, contents)?;
    Ok(Item {
        id: existing.id.clone(),
        share_id: existing.share_id.clone(),
        title: contents.title.clone(),
        note,
        content,
        state: existing.state,
        create_time: existing.create_time,
        modification_time: Utc::now().max(existing.modification_time),
    })
}

fn seal_fields(
    context: &EncryptionContext,
    contents: &ItemContents,
) -> CryptoResult<(EncryptedString, ItemType)> {
    let content = match &contents.fields {
        ItemFields::Login {
            username,
            password,
            urls,
            totp_uri,
        } => ItemType::Login {
            username: username.clone(),
            password: context.encrypt_string(password)?,
            urls: urls.clone(),
            totp_uri: context.encrypt_string(totp_uri)?,
        },
        ItemFields::Note => ItemType::Note,
        ItemFields::Alias { alias_email } => ItemType::Alias {
            alias_email: alias_email.clone(),
        },
        ItemFields::Identity {
            full_name,
            email,
            phone_number,
        } => ItemType::Identity {
            full_name: full_name.clone(),
            email: email.clone(),
            phone_number: context.encrypt_string(phone_number)?,
        },
        ItemFields::Password { password } => ItemType::Password {
            password: context.encrypt_string(password)?,
        },
    };

    Ok((context.encrypt_string(&contents.note)?, content))
}

/// Current TOTP code for a login item.
///
/// Returns `Ok(None)` for items without a TOTP URI, including every
/// non-login item. The decrypted URI never leaves this function.
pub fn current_totp<C: Clock>(
    context: &EncryptionContext,
    item: &Item,
    totp: &TotpManager<C>,
) -> VaultResult<Option<TotpCode>> {
    let ItemType::Login { totp_uri, .. } = &item.content else {
        return Ok(None);
    };
    let uri = context.decrypt_string(totp_uri)?;
    if uri.trim().is_empty() {
        debug!(item = %item.id, "login has no TOTP");
        return Ok(None);
    }
    Ok(Some(totp.generate(&uri)?))
}
