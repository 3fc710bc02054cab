use crate::constants::AliasConstants;
use crate::parser::{AliasTx, get_alias_txs, is_valid_alias_string};
use crate::resolver::{AliasResolution, resolve_aliases};
use ecash_primitives::{CashAddress, ECASH_PREFIX};
use ecash_primitives::chronik::Tx;
use serde::Serialize;
use std::collections::HashMap;

/// Whether an alias can be registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AliasAvailability {
    /// Not a syntactically valid alias.
    Invalid,
    Reserved,
    Registered(AliasTx),
    /// Claimed by an unconfirmed transaction.
    Pending(AliasTx),
    Available { fee_sats: u64 },
}

/// Lookup tables over a resolved alias set.
#[derive(Debug, Clone)]
pub struct AliasRegistry {
    constants: AliasConstants,
    registered: Vec<AliasTx>,
    pending: Vec<AliasTx>,
    by_alias: HashMap<String, usize>,
    pending_by_alias: HashMap<String, usize>,
    by_address: HashMap<CashAddress, Vec<usize>>,
}

impl AliasRegistry {
    pub fn new(resolution: AliasResolution, constants: AliasConstants) -> Self {
        let AliasResolution {
            registered,
            pending,
        } = resolution;

        let mut by_alias = HashMap::with_capacity(registered.len());
        let mut by_address: HashMap<CashAddress, Vec<usize>> = HashMap::new();
        for (index, alias_tx) in registered.iter().enumerate() {
            by_alias.insert(alias_tx.alias.clone(), index);
            by_address
                .entry(alias_tx.address.clone())
                .or_default()
                .push(index);
        }

        let pending_by_alias = pending
            .iter()
            .enumerate()
            .map(|(index, alias_tx)| (alias_tx.alias.clone(), index))
            .collect();

        Self {
            constants,
            registered,
            pending,
            by_alias,
            pending_by_alias,
            by_address,
        }
    }

    /// Parses and resolves `history` in one go.
    pub fn from_history(history: &[Tx], constants: AliasConstants) -> Self {
        let alias_txs = get_alias_txs(history, &constants);
        let resolution = resolve_aliases(alias_txs, &constants);
        Self::new(resolution, constants)
    }

    pub fn constants(&self) -> &AliasConstants {
        &self.constants
    }

    /// Registered aliases in resolution order.
    pub fn registered(&self) -> &[AliasTx] {
        &self.registered
    }

    pub fn pending(&self) -> &[AliasTx] {
        &self.pending
    }

    /// Registration of `alias`, ignoring case.
    pub fn alias_info(&self, alias: &str) -> Option<&AliasTx> {
        self.by_alias
            .get(&alias.to_lowercase())
            .map(|&index| &self.registered[index])
    }

    /// Unconfirmed claim of `alias`, ignoring case.
    pub fn pending_alias_info(&self, alias: &str) -> Option<&AliasTx> {
        self.pending_by_alias
            .get(&alias.to_lowercase())
            .map(|&index| &self.pending[index])
    }

    /// Aliases registered by `address` under any prefix, oldest first.
    pub fn aliases_for_address(&self, address: &CashAddress) -> Vec<&AliasTx> {
        let address = address.clone().with_prefix(ECASH_PREFIX);
        self.by_address
            .get(&address)
            .map(|indices| indices.iter().map(|&index| &self.registered[index]).collect())
            .unwrap_or_default()
    }

    pub fn availability(&self, alias: &str) -> AliasAvailability {
        let alias = alias.to_lowercase();

        if !is_valid_alias_string(&alias) || alias.len() > self.constants.max_length {
            return AliasAvailability::Invalid;
        }

        if self.constants.is_reserved(&alias) {
            return AliasAvailability::Reserved;
        }

        if let Some(alias_tx) = self.alias_info(&alias) {
            return AliasAvailability::Registered(alias_tx.clone());
        }

        if let Some(alias_tx) = self.pending_alias_info(&alias) {
            return AliasAvailability::Pending(alias_tx.clone());
        }

        match self.constants.registration_fee(alias.len()) {
            Some(fee_sats) => AliasAvailability::Available { fee_sats },
            None => AliasAvailability::Invalid,
        }
    }
}
