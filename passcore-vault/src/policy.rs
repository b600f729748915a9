//! Plan-based vault entitlements.
//!
//! Downgrading to a free plan never deletes vaults. Instead the free tier
//! only gets to *use* its oldest owned vaults, up to the plan's vault
//! limit; vaults shared with the user stay usable regardless of the limit.
//! Paid and trial plans can use everything.
//!
//! All functions here are pure: the same plan and vault list always give
//! the same answer.

use passcore_types::{Plan, ShareSelection, Vault};
use tracing::debug;

/// Vaults the user may currently use.
///
/// Paid and trial plans get every vault in input order. Free and unknown
/// plans get their owned vaults, oldest first, capped at the vault limit,
/// followed by all shared vaults, oldest first. The role held on a share
/// never affects the result.
pub fn compute_usable_vaults(plan: &Plan, vaults: &[Vault]) -> Vec<Vault> {
    if plan.plan_type.has_full_access() {
        return vaults.to_vec();
    }

    let (mut owned, mut shared): (Vec<Vault>, Vec<Vault>) =
        vaults.iter().cloned().partition(|vault| vault.is_owned);
    owned.sort_by_key(|vault| vault.create_time);
    shared.sort_by_key(|vault| vault.create_time);

    let usable_owned = plan.vault_limit.cap(owned.len());
    debug!(
        plan = plan.plan_type.internal_name(),
        owned = owned.len(),
        usable_owned,
        shared = shared.len(),
        "computed usable vaults"
    );

    owned.truncate(usable_owned);
    owned.extend(shared);
    owned
}

/// The usable vaults as an item query selection.
pub fn usable_share_selection(plan: &Plan, vaults: &[Vault]) -> ShareSelection {
    if plan.plan_type.has_full_access() {
        return ShareSelection::AllShares;
    }
    ShareSelection::Shares(
        compute_usable_vaults(plan, vaults)
            .into_iter()
            .map(|vault| vault.share_id)
            .collect(),
    )
}

/// Whether the user may create another vault of their own.
pub fn can_create_vault(plan: &Plan, vaults: &[Vault]) -> bool {
    let owned = vaults.iter().filter(|vault| vault.is_owned).count();
    plan.vault_limit.allows_another(owned)
}

pub fn can_create_alias(plan: &Plan, alias_count: usize) -> bool {
    plan.alias_limit.allows_another(alias_count)
}

pub fn can_add_totp(plan: &Plan, totp_count: usize) -> bool {
    plan.totp_limit.allows_another(totp_count)
}
