//! Vault-level logic for the passcore core.
//!
//! - [`policy`]: which vaults a plan lets the user use, and entitlement checks
//! - [`open_item`] / [`seal_item`] / [`reseal_item`]: move item records between their sealed
//!   form and a transient plaintext [`ItemContents`]
//! - [`current_totp`]: TOTP code for a login, decrypted only for the call
//! - [`ItemStore`]: the persistence collaborator
//! - [`PlanRefresher`]: keeps the plan snapshot fresh
//! - [`CoreConfig`]: tunables

mod config;
mod error;
mod item;
pub mod policy;
mod refresh;
mod store;

pub use config::CoreConfig;
pub use error::{VaultError, VaultResult};
pub use item::{current_totp, open_item, reseal_item, seal_item, ItemContents, ItemFields};
pub use policy::{
    can_add_totp, can_create_alias, can_create_vault, compute_usable_vaults,
    usable_share_selection,
};
pub use refresh::{PlanRefresher, PlanSource};
pub use store::{InMemoryItemStore, ItemStore};
