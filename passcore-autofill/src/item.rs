use passcore_types::{EncryptedString, Item, ItemId, ItemType, ShareId};

/// The subset of a login item the autofill service needs.
///
/// `password` is still sealed; it is only opened by
/// [`map_fields`](crate::map_fields).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutofillItem {
    pub item_id: ItemId,
    pub share_id: ShareId,
    pub title: String,
    pub username: String,
    pub password: EncryptedString,
    pub urls: Vec<String>,
}

impl AutofillItem {
    /// Builds an autofill item from a vault item.
    ///
    /// Returns `None` for anything that is not an active login.
    pub fn from_item(item: &Item) -> Option<Self> {
        if item.is_trashed() {
            return None;
        }
        match &item.content {
            ItemType::Login {
                username,
                password,
                urls,
                ..
            } => Some(Self {
                item_id: item.id.clone(),
                share_id: item.share_id.clone(),
                title: item.title.clone(),
                username: username.clone(),
                password: password.clone(),
                urls: urls.clone(),
            }),
            ItemType::Note
            | ItemType::Alias { .. }
            | ItemType::Identity { .. }
            | ItemType::Password { .. } => None,
        }
    }
}
