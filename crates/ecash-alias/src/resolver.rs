use crate::constants::{AliasConstants, RESERVED_BLOCKHEIGHT, RESERVED_TXID};
use crate::parser::AliasTx;
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of resolving a set of alias registrations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasResolution {
    /// Reserved aliases followed by the winning confirmed claims, in chain order.
    pub registered: Vec<AliasTx>,
    /// First unconfirmed claims of aliases that have no confirmed claim.
    pub pending: Vec<AliasTx>,
}

/// Orders registrations by blockheight, breaking ties by txid.
///
/// Two stable passes: the txid order of the first pass survives within each
/// blockheight of the second.
pub fn sort_alias_txs_by_txid_and_blockheight(mut alias_txs: Vec<AliasTx>) -> Vec<AliasTx> {
    alias_txs.sort_by(|a, b| a.txid.cmp(&b.txid));
    alias_txs.sort_by_key(|alias_tx| alias_tx.blockheight);
    alias_txs
}

/// Resolves conflicting claims: the earliest claim of an alias wins, reserved
/// aliases are never claimable.
pub fn resolve_aliases(unsorted_alias_txs: Vec<AliasTx>, constants: &AliasConstants) -> AliasResolution {
    let registration_address = constants.registration_address();

    let mut registered_aliases = HashSet::new();
    let mut resolution = AliasResolution::default();

    for reserved in &constants.reserved_aliases {
        let alias = reserved.to_lowercase();
        if registered_aliases.insert(alias.clone()) {
            resolution.registered.push(AliasTx {
                address: registration_address.clone(),
                alias,
                txid: RESERVED_TXID.to_string(),
                blockheight: RESERVED_BLOCKHEIGHT,
            });
        }
    }

    for mut alias_tx in sort_alias_txs_by_txid_and_blockheight(unsorted_alias_txs) {
        alias_tx.alias = alias_tx.alias.to_lowercase();

        if !registered_aliases.insert(alias_tx.alias.clone()) {
            tracing::trace!(
                target: "alias",
                "Skipping claim of already registered alias {} in {}",
                alias_tx.alias,
                alias_tx.txid
            );
            continue;
        }

        // Unconfirmed claims block later claims but are not registrations yet.
        if alias_tx.is_confirmed() {
            resolution.registered.push(alias_tx);
        } else {
            resolution.pending.push(alias_tx);
        }
    }

    tracing::debug!(
        target: "alias",
        "Resolved {} registered aliases ({} reserved), {} pending",
        resolution.registered.len(),
        constants.reserved_aliases.len(),
        resolution.pending.len()
    );

    resolution
}

/// Returns the valid registrations, reserved aliases first.
pub fn get_valid_alias_registrations(
    unsorted_alias_txs: Vec<AliasTx>,
    constants: &AliasConstants,
) -> Vec<AliasTx> {
    resolve_aliases(unsorted_alias_txs, constants).registered
}
