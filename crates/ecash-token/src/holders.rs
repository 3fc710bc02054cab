use ecash_primitives::CashAddress;
use ecash_primitives::chronik::ScriptUtxo;
use indexmap::IndexMap;
use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::HashSet;

/// Token balance of each holder, in the order holders first appear in the
/// UTXO set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenHolders {
    balances: IndexMap<CashAddress, BigUint>,
}

impl TokenHolders {
    /// Sums the token UTXOs per address.
    ///
    /// UTXOs without a token amount, mint batons, scripts with no address and
    /// the addresses in `excluded` are skipped.
    pub fn collect(utxos: &[ScriptUtxo], excluded: &HashSet<CashAddress>) -> Self {
        let mut balances: IndexMap<CashAddress, BigUint> = IndexMap::new();

        for utxo in utxos {
            let Some(token) = &utxo.token else {
                continue;
            };

            if token.is_mint_baton || token.amount.is_zero() {
                continue;
            }

            let address = match CashAddress::from_output_script(&utxo.script) {
                Ok(address) => address,
                Err(err) => {
                    tracing::trace!(
                        target: "airdrop",
                        "Skipping {}:{}: {err}",
                        utxo.outpoint.txid,
                        utxo.outpoint.out_idx
                    );
                    continue;
                }
            };

            if excluded.contains(&address) {
                continue;
            }

            *balances.entry(address).or_default() += &token.amount;
        }

        Self { balances }
    }

    /// Total balance across all holders.
    pub fn circulating_supply(&self) -> BigUint {
        self.balances.values().sum()
    }

    /// Holders whose balance is strictly below `min_qty`.
    pub fn below<'a>(&'a self, min_qty: &'a BigUint) -> impl Iterator<Item = &'a CashAddress> {
        self.balances
            .iter()
            .filter(move |(_, qty)| *qty < min_qty)
            .map(|(address, _)| address)
    }

    pub fn balance(&self, address: &CashAddress) -> Option<&BigUint> {
        self.balances.get(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CashAddress, &BigUint)> {
        self.balances.iter()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}
