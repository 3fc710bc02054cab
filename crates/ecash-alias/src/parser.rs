use crate::constants::{AliasConstants, UNCONFIRMED_BLOCKHEIGHT};
use bitcoin::opcodes::all::{OP_PUSHBYTES_4, OP_RETURN};
use ecash_primitives::chronik::{Tx, TxOutput};
use ecash_primitives::{CashAddress, OutputType, Script, classify};
use serde::{Deserialize, Serialize};

/// A parsed alias registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTx {
    /// Address that signed the first input.
    pub address: CashAddress,
    pub alias: String,
    pub txid: String,
    /// Confirmed height, or [`UNCONFIRMED_BLOCKHEIGHT`].
    pub blockheight: u32,
}

impl AliasTx {
    pub fn is_confirmed(&self) -> bool {
        self.blockheight < UNCONFIRMED_BLOCKHEIGHT
    }
}

/// Reason a transaction is not a valid alias registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAliasTx {
    #[error("transaction has no inputs")]
    NoInputs,
    #[error("first input carries no output script")]
    MissingInputScript,
    /// Registrations from P2SH inputs are not supported yet.
    #[error("first input does not spend a P2PKH output")]
    NonP2pkhInput,
    #[error("zero-value output does not start with the alias prefix")]
    InvalidPrefix,
    #[error("alias push is missing")]
    MissingAliasPush,
    #[error("declared alias length {declared} does not match the pushed {actual} bytes")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("alias length {length} exceeds the maximum of {max_length}")]
    TooLong { length: usize, max_length: usize },
    #[error("alias is not valid UTF-8")]
    InvalidUtf8,
    #[error("alias {0:?} contains characters other than a-z and 0-9")]
    InvalidCharacters(String),
    #[error("no alias output found")]
    NoAlias,
    #[error("no registration fee is defined for alias length {0}")]
    UnpricedLength(usize),
    #[error("paid {paid} sats, registration requires {required} sats")]
    InsufficientFee { paid: u64, required: u64 },
}

/// An output of a candidate registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedOutput<'a> {
    /// Zero-value output, the only place an alias may be carried.
    Data(&'a Script),
    /// Output with a value, counted as fee when it pays the registration address.
    Payment { sats: u64, script: &'a Script },
}

impl<'a> From<&'a TxOutput> for ParsedOutput<'a> {
    fn from(output: &'a TxOutput) -> Self {
        match output.value {
            0 => Self::Data(&output.output_script),
            sats => Self::Payment {
                sats,
                script: &output.output_script,
            },
        }
    }
}

/// Returns `true` if `alias` is non-empty and made of `a-z0-9` only.
pub fn is_valid_alias_string(alias: &str) -> bool {
    !alias.is_empty()
        && alias
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Decodes `OP_RETURN <4-byte prefix> <len> <alias>`.
fn parse_alias_output(script: &Script, constants: &AliasConstants) -> Result<String, InvalidAliasTx> {
    let payload = script
        .as_bytes()
        .strip_prefix(&[OP_RETURN.to_u8(), OP_PUSHBYTES_4.to_u8()])
        .and_then(|rest| rest.strip_prefix(&constants.op_code_prefix[..]))
        .ok_or(InvalidAliasTx::InvalidPrefix)?;

    let (&declared, alias_bytes) = payload
        .split_first()
        .ok_or(InvalidAliasTx::MissingAliasPush)?;
    let declared = usize::from(declared);

    if alias_bytes.len() != declared {
        return Err(InvalidAliasTx::LengthMismatch {
            declared,
            actual: alias_bytes.len(),
        });
    }

    if declared > constants.max_length {
        return Err(InvalidAliasTx::TooLong {
            length: declared,
            max_length: constants.max_length,
        });
    }

    let alias = std::str::from_utf8(alias_bytes).map_err(|_| InvalidAliasTx::InvalidUtf8)?;

    if !is_valid_alias_string(alias) {
        return Err(InvalidAliasTx::InvalidCharacters(alias.to_string()));
    }

    Ok(alias.to_string())
}

/// Parses a transaction as an alias registration, returning why it is not one
/// on failure.
pub fn try_parse_alias_tx(tx: &Tx, constants: &AliasConstants) -> Result<AliasTx, InvalidAliasTx> {
    let input = tx.inputs.first().ok_or(InvalidAliasTx::NoInputs)?;
    let input_script = input
        .output_script
        .as_deref()
        .ok_or(InvalidAliasTx::MissingInputScript)?;

    // Assume P2PKH for now.
    let OutputType::PubKeyHash(hash) = classify(input_script) else {
        return Err(InvalidAliasTx::NonP2pkhInput);
    };
    let address = CashAddress::p2pkh(hash);

    let registration_script = constants.registration_output_script();

    let mut alias = None;
    let mut fee_paid_sats = 0u64;

    for output in &tx.outputs {
        match ParsedOutput::from(output) {
            ParsedOutput::Data(script) => {
                alias = Some(parse_alias_output(script, constants)?);
            }
            ParsedOutput::Payment { sats, script } => {
                if script.as_bytes() == registration_script.as_bytes() {
                    fee_paid_sats = fee_paid_sats.saturating_add(sats);
                }
            }
        }
    }

    let alias = alias.ok_or(InvalidAliasTx::NoAlias)?;

    let required = constants
        .registration_fee(alias.len())
        .ok_or(InvalidAliasTx::UnpricedLength(alias.len()))?;

    if fee_paid_sats < required {
        return Err(InvalidAliasTx::InsufficientFee {
            paid: fee_paid_sats,
            required,
        });
    }

    Ok(AliasTx {
        address,
        alias,
        txid: tx.txid.clone(),
        blockheight: tx.block_height().unwrap_or(UNCONFIRMED_BLOCKHEIGHT),
    })
}

/// Parses a transaction as an alias registration.
///
/// Invalid transactions yield `None` so that one malformed transaction never
/// aborts the processing of a history.
pub fn parse_alias_tx(tx: &Tx, constants: &AliasConstants) -> Option<AliasTx> {
    try_parse_alias_tx(tx, constants)
        .inspect_err(|err| {
            tracing::trace!(target: "alias", txid = %tx.txid, "Not an alias registration: {err}")
        })
        .ok()
}

/// Collects the alias registrations of `history`, preserving order.
pub fn get_alias_txs(history: &[Tx], constants: &AliasConstants) -> Vec<AliasTx> {
    let alias_txs = history
        .iter()
        .filter_map(|tx| parse_alias_tx(tx, constants))
        .collect::<Vec<_>>();

    tracing::debug!(
        target: "alias",
        "Found {} alias registrations in {} transactions",
        alias_txs.len(),
        history.len()
    );

    alias_txs
}
