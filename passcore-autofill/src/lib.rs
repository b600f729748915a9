//! Autofill field mapping for the passcore vault core.
//!
//! The platform autofill service describes a form as parallel lists of
//! opaque field ids and detected [`FieldType`]s. [`map_fields`] decides
//! which of those slots receive a login's username and password and
//! produces the flat [`AutofillMappings`] handed back to the platform.
//!
//! Only login items can be autofilled; [`AutofillItem::from_item`] picks
//! them out of the vault while leaving the password encrypted. The
//! password is decrypted at mapping time, inside the caller's
//! [`EncryptionContext`](passcore_crypto::EncryptionContext) scope, and is
//! never given a display value.

mod field;
mod item;
mod mapper;

pub use field::{FieldId, FieldType};
pub use item::AutofillItem;
pub use mapper::{map_fields, AutofillMappings, DatasetMapping};
