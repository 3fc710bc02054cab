//! Transaction and UTXO records as served by the chronik indexer.
//!
//! Only the fields consumed by the alias resolver and the token tools are
//! modelled. Unknown fields are ignored.

use crate::serde_utils::{biguint_or_string, option_hex_script, u64_or_string};
use bitcoin::ScriptBuf;
use num_bigint::BigUint;
use serde::Deserialize;

/// A transaction from an address or script history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tx {
    pub txid: String,
    #[serde(default)]
    pub inputs: Vec<TxInput>,
    #[serde(default)]
    pub outputs: Vec<TxOutput>,
    /// `None` while the transaction is unconfirmed.
    #[serde(default)]
    pub block: Option<BlockMetadata>,
}

impl Tx {
    /// Height of the confirming block.
    pub fn block_height(&self) -> Option<u32> {
        self.block.as_ref().map(|block| block.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxInput {
    /// Script of the spent output, missing for coinbase inputs.
    #[serde(default, deserialize_with = "option_hex_script::deserialize")]
    pub output_script: Option<ScriptBuf>,
    #[serde(default, alias = "sats", deserialize_with = "u64_or_string::deserialize")]
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOutput {
    #[serde(alias = "sats", deserialize_with = "u64_or_string::deserialize")]
    pub value: u64,
    #[serde(deserialize_with = "crate::serde_utils::hex_script::deserialize")]
    pub output_script: ScriptBuf,
    #[serde(default)]
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub height: u32,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutPoint {
    pub txid: String,
    pub out_idx: u32,
}

/// An unspent output holding (or not) a token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptUtxo {
    pub outpoint: OutPoint,
    /// `-1` while unconfirmed.
    #[serde(default = "unconfirmed_height")]
    pub block_height: i32,
    #[serde(default)]
    pub is_coinbase: bool,
    #[serde(default, alias = "sats", deserialize_with = "u64_or_string::deserialize")]
    pub value: u64,
    #[serde(deserialize_with = "crate::serde_utils::hex_script::deserialize")]
    pub script: ScriptBuf,
    #[serde(default)]
    pub token: Option<Token>,
}

fn unconfirmed_height() -> i32 {
    -1
}

/// Token data attached to an output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub token_id: String,
    /// Undecimalized token quantity.
    #[serde(alias = "atoms", deserialize_with = "biguint_or_string::deserialize")]
    pub amount: BigUint,
    #[serde(default)]
    pub is_mint_baton: bool,
}
