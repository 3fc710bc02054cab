//! Token input selection for sends and burns.

use crate::error::{Error, Result};
use ecash_primitives::chronik::ScriptUtxo;
use num_bigint::BigUint;
use num_traits::Zero;

/// Inputs and output amounts of a token send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSend {
    pub inputs: Vec<ScriptUtxo>,
    /// Amount to the recipient, followed by the change if there is any.
    pub send_amounts: Vec<BigUint>,
}

/// Inputs and amounts of a token burn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBurn {
    pub inputs: Vec<ScriptUtxo>,
    pub burn_amount: BigUint,
    /// Remainder to send back to the owner.
    pub change: BigUint,
}

/// Converts a decimal token quantity into atoms, e.g. `"1.5"` with 2
/// decimals is `150`.
pub fn undecimalize(qty: &str, decimals: u32) -> Result<BigUint> {
    let qty = qty.trim();
    let invalid = |reason| Error::InvalidTokenQty {
        qty: qty.to_string(),
        reason,
    };

    let (whole, fraction) = qty.split_once('.').unwrap_or((qty, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("empty quantity"));
    }

    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a non-negative decimal number"));
    }

    let decimals = decimals as usize;

    if fraction.len() > decimals {
        return Err(invalid("more decimal places than the token supports"));
    }

    let digits = format!("{whole}{fraction:0<decimals$}");

    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| invalid("not a number"))
}

/// Renders atoms as a decimal token quantity without trailing zeros, e.g.
/// `150` with 2 decimals is `"1.5"`.
pub fn decimalize(atoms: &BigUint, decimals: u32) -> String {
    let digits = atoms.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let digits = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);

    match fraction.trim_end_matches('0') {
        "" => whole.to_string(),
        fraction => format!("{whole}.{fraction}"),
    }
}

/// Picks token UTXOs in order until they cover `target`.
fn select_token_inputs(
    utxos: &[ScriptUtxo],
    token_id: &str,
    target: &BigUint,
    action: &'static str,
) -> Result<(Vec<ScriptUtxo>, BigUint)> {
    let mut inputs = Vec::new();
    let mut total = BigUint::zero();

    for utxo in utxos {
        let Some(token) = &utxo.token else {
            continue;
        };

        if token.token_id != token_id || token.is_mint_baton {
            continue;
        }

        total += &token.amount;
        inputs.push(utxo.clone());

        if &total >= target {
            return Ok((inputs, total));
        }
    }

    Err(Error::InsufficientTokenBalance {
        action,
        available: total,
        requested: target.clone(),
    })
}

fn positive_qty(qty: &str, decimals: u32) -> Result<BigUint> {
    let atoms = undecimalize(qty, decimals)?;

    if atoms.is_zero() {
        return Err(Error::InvalidTokenQty {
            qty: qty.trim().to_string(),
            reason: "must be greater than zero",
        });
    }

    Ok(atoms)
}

/// Selects the UTXOs of `token_id` needed to send `send_qty`.
pub fn get_send_token_inputs(
    utxos: &[ScriptUtxo],
    token_id: &str,
    send_qty: &str,
    decimals: u32,
) -> Result<TokenSend> {
    let send_amount = positive_qty(send_qty, decimals)?;
    let (inputs, total) = select_token_inputs(utxos, token_id, &send_amount, "send")?;

    let change = &total - &send_amount;
    let mut send_amounts = vec![send_amount];

    if !change.is_zero() {
        send_amounts.push(change);
    }

    Ok(TokenSend {
        inputs,
        send_amounts,
    })
}

/// Selects the UTXOs of `token_id` needed to burn `burn_qty`.
pub fn get_burn_token_inputs(
    utxos: &[ScriptUtxo],
    token_id: &str,
    burn_qty: &str,
    decimals: u32,
) -> Result<TokenBurn> {
    let burn_amount = positive_qty(burn_qty, decimals)?;
    let (inputs, total) = select_token_inputs(utxos, token_id, &burn_amount, "burn")?;
    let change = &total - &burn_amount;

    Ok(TokenBurn {
        inputs,
        burn_amount,
        change,
    })
}
