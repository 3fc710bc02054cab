use ecash_primitives::serde_utils::hex_array;
use ecash_primitives::{CashAddress, ScriptBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Height assigned to unconfirmed registrations so they sort after every
/// confirmed one.
pub const UNCONFIRMED_BLOCKHEIGHT: u32 = 100_000_000;

/// Txid of the synthetic registrations seeded for reserved aliases.
pub const RESERVED_TXID: &str = "reserved";

/// Height of the synthetic registrations seeded for reserved aliases.
pub const RESERVED_BLOCKHEIGHT: u32 = 1;

// ".xec"
const MAINNET_OP_CODE_PREFIX: [u8; 4] = [0x2e, 0x78, 0x65, 0x63];

// ecash:qp3c268rd5946l2f5m5es4x25f7ewu4sjvpy52pqa8
const MAINNET_REGISTRATION_HASH160: [u8; 20] = [
    0x63, 0x85, 0x68, 0xe3, 0x6d, 0x0b, 0x5d, 0x7d, 0x49, 0xa6, 0xe9, 0x98, 0x54, 0xca, 0xa2,
    0x7d, 0x97, 0x72, 0xb0, 0x93,
];

const MAINNET_MAX_LENGTH: usize = 21;

const MAINNET_RESERVED_ALIASES: &[&str] = &[
    "avalanche",
    "electrum",
    "electrumabc",
    "bitcoin",
    "bitcoinabc",
    "ecash",
    "ecashofficial",
    "xec",
    "abc",
    "cashtab",
    "ecashtab",
    "cashtabwallet",
    "xecwallet",
    "gnc",
    "etoken",
    "token",
    "cashfusion",
    "coinex",
    "binance",
    "huobi",
    "mexc",
    "kucoin",
    "gate",
    "gateio",
    "kraken",
    "yobit",
    "okx",
    "okex",
    "bitmart",
    "bitfinex",
    "alias",
    "aliases",
];

/// Protocol parameters of the alias system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasConstants {
    /// Lokad-style prefix pushed right after OP_RETURN.
    #[serde(with = "hex_array")]
    pub op_code_prefix: [u8; 4],
    /// Maximum alias length in bytes.
    pub max_length: usize,
    /// Hash160 of the P2PKH registration address.
    #[serde(with = "hex_array")]
    pub registration_hash160: [u8; 20],
    /// Registration fee in satoshis, keyed by alias length.
    pub registration_fees_sats: BTreeMap<usize, u64>,
    /// Aliases that can never be registered.
    pub reserved_aliases: Vec<String>,
}

impl Default for AliasConstants {
    fn default() -> Self {
        Self::mainnet()
    }
}

/// Registration fee of one alias length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasPrice {
    pub length: usize,
    pub fee_sats: u64,
}

impl AliasConstants {
    /// Parameters of the alias system on eCash mainnet.
    pub fn mainnet() -> Self {
        // 558 sats for a single character, one less per extra character down to 551.
        let registration_fees_sats = (1..=MAINNET_MAX_LENGTH)
            .map(|length| (length, 559u64.saturating_sub(length as u64).max(551)))
            .collect();

        Self {
            op_code_prefix: MAINNET_OP_CODE_PREFIX,
            max_length: MAINNET_MAX_LENGTH,
            registration_hash160: MAINNET_REGISTRATION_HASH160,
            registration_fees_sats,
            reserved_aliases: MAINNET_RESERVED_ALIASES
                .iter()
                .map(|alias| alias.to_string())
                .collect(),
        }
    }

    /// Fee required to register an alias of `alias_length` bytes.
    pub fn registration_fee(&self, alias_length: usize) -> Option<u64> {
        self.registration_fees_sats.get(&alias_length).copied()
    }

    pub fn registration_address(&self) -> CashAddress {
        CashAddress::p2pkh(self.registration_hash160)
    }

    pub fn registration_output_script(&self) -> ScriptBuf {
        self.registration_address().output_script()
    }

    /// Whether `alias` is reserved, ignoring case.
    pub fn is_reserved(&self, alias: &str) -> bool {
        self.reserved_aliases
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(alias))
    }

    /// Fees of every registrable length, shortest first.
    pub fn price_table(&self) -> Vec<AliasPrice> {
        self.registration_fees_sats
            .iter()
            .filter(|(length, _)| (1..=self.max_length).contains(*length))
            .map(|(&length, &fee_sats)| AliasPrice { length, fee_sats })
            .collect()
    }
}
