//! XEC airdrops to token holders.
//!
//! A pro rata airdrop is computed in four passes over the token UTXOs:
//!
//! 1. Sum the balances of every holder outside the excluded addresses.
//! 2. Exclude the holders below the minimum token quantity and sum again.
//! 3. Exclude the holders whose share would fall below dust.
//! 4. Sum the remaining holders again and pay each of them
//!    `floor(balance * airdrop / supply)`.
//!
//! Excluding dust recipients only shrinks the supply, so the shares computed
//! in the last pass never drop below dust.

use crate::error::{Error, Result};
use crate::holders::TokenHolders;
use ecash_primitives::amount::{DUST_SATS, format_xec, parse_xec};
use ecash_primitives::chronik::ScriptUtxo;
use ecash_primitives::{CashAddress, ECASH_PREFIX};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use std::collections::HashSet;

/// A single airdrop payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropRecipient {
    pub address: CashAddress,
    pub sats: u64,
}

/// Airdrop payments, in the order the holders appear in the UTXO set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Airdrop {
    pub recipients: Vec<AirdropRecipient>,
}

impl Airdrop {
    pub fn total_sats(&self) -> u64 {
        self.recipients.iter().map(|recipient| recipient.sats).sum()
    }

    /// Renders one `address, xec` line per recipient.
    pub fn to_csv(&self) -> String {
        self.recipients
            .iter()
            .map(|recipient| format!("{}, {}", recipient.address, format_xec(recipient.sats)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn exclusion_set(excluded_addresses: &[CashAddress]) -> HashSet<CashAddress> {
    excluded_addresses
        .iter()
        .map(|address| address.clone().with_prefix(ECASH_PREFIX))
        .collect()
}

/// Rejects UTXO sets holding more than one token.
fn ensure_single_token(token_utxos: &[ScriptUtxo]) -> Result<()> {
    let mut token_ids = token_utxos
        .iter()
        .filter_map(|utxo| utxo.token.as_ref())
        .map(|token| token.token_id.as_str());

    let Some(first) = token_ids.next() else {
        return Ok(());
    };

    match token_ids.find(|token_id| *token_id != first) {
        Some(second) => Err(Error::MixedTokens {
            first: first.to_string(),
            second: second.to_string(),
        }),
        None => Ok(()),
    }
}

fn pro_rata_sats(qty: &BigUint, supply: &BigUint, airdrop_sats: u64) -> u64 {
    (qty * BigUint::from(airdrop_sats) / supply)
        .to_u64()
        .expect("qty is at most supply, the share never exceeds airdrop_sats; qed")
}

/// Splits `airdrop_sats` across the token holders pro rata to their balance.
///
/// All UTXOs must belong to the same token. Addresses may be excluded under
/// any prefix, they are matched by kind and hash.
pub fn calculate_airdrop(
    token_utxos: &[ScriptUtxo],
    excluded_addresses: &[CashAddress],
    airdrop_sats: u64,
    min_token_qty: &BigUint,
) -> Result<Airdrop> {
    ensure_single_token(token_utxos)?;

    let mut excluded = exclusion_set(excluded_addresses);

    let holders = TokenHolders::collect(token_utxos, &excluded);
    let circulating_supply = holders.circulating_supply();

    if circulating_supply.is_zero() {
        return Err(Error::NoEligibleHolders);
    }

    tracing::debug!(
        target: "airdrop",
        "{} holders with a circulating supply of {circulating_supply}",
        holders.len()
    );

    excluded.extend(holders.below(min_token_qty).cloned());

    let eligible = TokenHolders::collect(token_utxos, &excluded);
    let eligible_supply = eligible.circulating_supply();

    if eligible_supply.is_zero() {
        return Err(Error::NoEligibleHolders);
    }

    let dust_recipients = eligible
        .iter()
        .filter(|(_, qty)| pro_rata_sats(qty, &eligible_supply, airdrop_sats) < DUST_SATS)
        .map(|(address, _)| address.clone())
        .collect::<Vec<_>>();

    tracing::debug!(
        target: "airdrop",
        "Excluding {} holders below the minimum token quantity, {} below dust",
        holders.len() - eligible.len(),
        dust_recipients.len()
    );

    excluded.extend(dust_recipients);

    let recipients = TokenHolders::collect(token_utxos, &excluded);
    let supply = recipients.circulating_supply();

    if supply.is_zero() {
        return Err(Error::AirdropAmountTooLow);
    }

    let recipients = recipients
        .iter()
        .map(|(address, qty)| AirdropRecipient {
            address: address.clone(),
            sats: pro_rata_sats(qty, &supply, airdrop_sats),
        })
        .collect();

    Ok(Airdrop { recipients })
}

/// Splits `airdrop_sats` equally across the holders of at least
/// `min_token_qty`.
///
/// Any remainder of the division is not distributed.
pub fn calculate_equal_airdrop(
    token_utxos: &[ScriptUtxo],
    excluded_addresses: &[CashAddress],
    airdrop_sats: u64,
    min_token_qty: &BigUint,
) -> Result<Airdrop> {
    ensure_single_token(token_utxos)?;

    let mut excluded = exclusion_set(excluded_addresses);

    let holders = TokenHolders::collect(token_utxos, &excluded);
    excluded.extend(holders.below(min_token_qty).cloned());

    let eligible = TokenHolders::collect(token_utxos, &excluded);

    if eligible.is_empty() {
        return Err(Error::NoEligibleHolders);
    }

    let per_holder_sats = airdrop_sats / eligible.len() as u64;

    if per_holder_sats < DUST_SATS {
        return Err(Error::EqualAirdropBelowDust {
            holders: eligible.len(),
            per_holder_sats,
        });
    }

    let recipients = eligible
        .iter()
        .map(|(address, _)| AirdropRecipient {
            address: address.clone(),
            sats: per_holder_sats,
        })
        .collect();

    Ok(Airdrop { recipients })
}

/// Computes a pro rata airdrop of `airdrop_amount_xec` and renders it as
/// `address, xec` lines.
pub fn get_airdrop_tx(
    token_utxos: &[ScriptUtxo],
    excluded_addresses: &[CashAddress],
    airdrop_amount_xec: &str,
    min_token_qty: &BigUint,
) -> Result<String> {
    let airdrop_sats = parse_xec(airdrop_amount_xec)?;
    calculate_airdrop(token_utxos, excluded_addresses, airdrop_sats, min_token_qty)
        .map(|airdrop| airdrop.to_csv())
}

/// Computes an equal airdrop of `airdrop_amount_xec` and renders it as
/// `address, xec` lines.
pub fn get_equal_airdrop_tx(
    token_utxos: &[ScriptUtxo],
    excluded_addresses: &[CashAddress],
    airdrop_amount_xec: &str,
    min_token_qty: &BigUint,
) -> Result<String> {
    let airdrop_sats = parse_xec(airdrop_amount_xec)?;
    calculate_equal_airdrop(token_utxos, excluded_addresses, airdrop_sats, min_token_qty)
        .map(|airdrop| airdrop.to_csv())
}
