//! Persistence seam for encrypted item records.
//!
//! The core never touches a database itself. Whatever stores items
//! implements [`ItemStore`]; records cross the boundary still sealed.

use crate::error::{VaultError, VaultResult};
use passcore_types::{Item, ItemId, ShareId, ShareSelection};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

pub trait ItemStore: Send + Sync {
    /// Fetches one item. `NotFound` if it does not exist.
    fn get(&self, share_id: &ShareId, item_id: &ItemId) -> VaultResult<Item>;

    /// Inserts or replaces an item, keyed by `(share_id, id)`.
    fn put(&self, item: Item) -> VaultResult<()>;

    /// Deletes and returns an item. `NotFound` if it does not exist.
    fn remove(&self, share_id: &ShareId, item_id: &ItemId) -> VaultResult<Item>;

    /// Items in the selected shares, oldest first.
    fn list(&self, selection: &ShareSelection) -> VaultResult<Vec<Item>>;
}

/// In-memory [`ItemStore`].
#[derive(Default)]
pub struct InMemoryItemStore {
    items: RwLock<HashMap<(ShareId, ItemId), Item>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items. Still counts after a writer panicked, while
    /// the fallible operations report [`VaultError::Storage`].
    pub fn len(&self) -> usize {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn not_found(share_id: &ShareId, item_id: &ItemId) -> VaultError {
    VaultError::NotFound {
        share_id: share_id.clone(),
        item_id: item_id.clone(),
    }
}

impl ItemStore for InMemoryItemStore {
    fn get(&self, share_id: &ShareId, item_id: &ItemId) -> VaultResult<Item> {
        let items = self
            .items
            .read()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        items
            .get(&(share_id.clone(), item_id.clone()))
            .cloned()
            .ok_or_else(|| not_found(share_id, item_id))
    }

    fn put(&self, item: Item) -> VaultResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        items.insert((item.share_id.clone(), item.id.clone()), item);
        Ok(())
    }

    fn remove(&self, share_id: &ShareId, item_id: &ItemId) -> VaultResult<Item> {
        let mut items = self
            .items
            .write()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        items
            .remove(&(share_id.clone(), item_id.clone()))
            .ok_or_else(|| not_found(share_id, item_id))
    }

    fn list(&self, selection: &ShareSelection) -> VaultResult<Vec<Item>> {
        let items = self
            .items
            .read()
            .map_err(|e| VaultError::Storage(e.to_string()))?;
        let mut selected: Vec<Item> = items
            .values()
            .filter(|item| selection.includes(&item.share_id))
            .cloned()
            .collect();
        selected.sort_by(|a, b| {
            a.create_time
                .cmp(&b.create_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(selected)
    }
}
