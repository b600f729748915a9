use crate::field::{FieldId, FieldType};
use crate::item::AutofillItem;
use passcore_crypto::{CryptoResult, EncryptionContext};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// One value to place into one platform field.
#[derive(Clone, PartialEq, Eq)]
pub struct DatasetMapping {
    pub field_id: FieldId,
    /// Value delivered to the field. Wiped on drop.
    pub contents: Zeroizing<String>,
    /// Text the platform may render in its suggestion UI.
    pub display_value: String,
}

impl fmt::Debug for DatasetMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetMapping")
            .field("field_id", &self.field_id)
            .field("contents", &"<redacted>")
            .field("display_value", &self.display_value)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutofillMappings {
    pub mappings: Vec<DatasetMapping>,
}

impl AutofillMappings {
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DatasetMapping> {
        self.mappings.iter()
    }
}

/// Maps a login onto the fields of a form.
///
/// `field_ids` and `field_types` are parallel lists describing the form.
/// The username goes into the first `Email` field, or the first `Username`
/// field when there is no email field, with the username as display text.
/// The password is decrypted into the first `Password` field with an empty
/// display value. A missing slot is skipped, not an error.
///
/// Fails only if the password cannot be decrypted with `context`.
pub fn map_fields(
    context: &EncryptionContext,
    item: &AutofillItem,
    field_ids: &[FieldId],
    field_types: &[FieldType],
) -> CryptoResult<AutofillMappings> {
    let mut mappings = Vec::with_capacity(2);

    let login_index = FieldType::Email
        .first_in(field_types)
        .or_else(|| FieldType::Username.first_in(field_types));
    match login_index.and_then(|index| field_ids.get(index)) {
        Some(field_id) => mappings.push(DatasetMapping {
            field_id: field_id.clone(),
            contents: Zeroizing::new(item.username.clone()),
            display_value: item.username.clone(),
        }),
        None => debug!(index = ?login_index, "no username slot to fill"),
    }

    let password_index = FieldType::Password.first_in(field_types);
    match password_index.and_then(|index| field_ids.get(index)) {
        Some(field_id) => mappings.push(DatasetMapping {
            field_id: field_id.clone(),
            contents: context.decrypt_string(&item.password)?,
            display_value: String::new(),
        }),
        None => debug!(index = ?password_index, "no password slot to fill"),
    }

    Ok(AutofillMappings { mappings })
}
