//! Shared domain types for the passcore vault core.
//!
//! Everything here is plain data: identifiers, shares (vaults), plans and
//! encrypted item records. Nothing in this crate touches key material;
//! secret fields are carried as opaque [`EncryptedString`] values and only
//! `passcore-crypto` can open them.

mod ids;
mod item;
mod plan;
mod vault;

pub use ids::{ItemId, ShareId, UserId};
pub use item::{EncryptedString, Item, ItemState, ItemType};
pub use plan::{Plan, PlanLimit, PlanType};
pub use vault::{ShareRole, ShareSelection, Vault};
