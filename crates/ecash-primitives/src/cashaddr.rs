//! CashAddr address format.
//!
//! A cashaddr is `prefix:payload` where the payload is the base32 encoding of a
//! version byte followed by the 20-byte hash, plus a 40-bit BCH checksum over
//! both the prefix and the payload.
//!
//! https://github.com/bitcoincashorg/bitcoincash.org/blob/master/spec/cashaddr.md

use crate::error::Error;
use crate::script::{OutputType, classify};
use bitcoin::hashes::Hash;
use bitcoin::{PubkeyHash, Script, ScriptBuf, ScriptHash};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix of eCash mainnet addresses.
pub const ECASH_PREFIX: &str = "ecash";

const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const GENERATOR: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

const CHECKSUM_LEN: usize = 8;

/// Version byte plus a 160-bit hash.
const PAYLOAD_LEN: usize = 21;

/// Kind of script an address pays to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressKind {
    P2pkh,
    P2sh,
}

impl AddressKind {
    fn type_bits(self) -> u8 {
        match self {
            Self::P2pkh => 0,
            Self::P2sh => 1,
        }
    }
}

/// A decoded cashaddr.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CashAddress {
    prefix: String,
    kind: AddressKind,
    hash: [u8; 20],
}

impl CashAddress {
    pub fn new(prefix: impl Into<String>, kind: AddressKind, hash: [u8; 20]) -> Self {
        Self {
            prefix: prefix.into().to_ascii_lowercase(),
            kind,
            hash,
        }
    }

    /// Constructs an `ecash:` P2PKH address.
    pub fn p2pkh(hash: [u8; 20]) -> Self {
        Self::new(ECASH_PREFIX, AddressKind::P2pkh, hash)
    }

    /// Constructs an `ecash:` P2SH address.
    pub fn p2sh(hash: [u8; 20]) -> Self {
        Self::new(ECASH_PREFIX, AddressKind::P2sh, hash)
    }

    /// Derives the `ecash:` address an output script pays to.
    pub fn from_output_script(script: &Script) -> Result<Self, Error> {
        match classify(script) {
            OutputType::PubKeyHash(hash) => Ok(Self::p2pkh(hash)),
            OutputType::ScriptHash(hash) => Ok(Self::p2sh(hash)),
            OutputType::NonStandard | OutputType::NullData => {
                Err(Error::NonStandardScript(hex::encode(script.as_bytes())))
            }
        }
    }

    /// Returns the same address under a different prefix.
    pub fn with_prefix(self, prefix: impl Into<String>) -> Self {
        Self::new(prefix, self.kind, self.hash)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }

    /// Returns the output script paying to this address.
    pub fn output_script(&self) -> ScriptBuf {
        match self.kind {
            AddressKind::P2pkh => ScriptBuf::new_p2pkh(&PubkeyHash::from_byte_array(self.hash)),
            AddressKind::P2sh => ScriptBuf::new_p2sh(&ScriptHash::from_byte_array(self.hash)),
        }
    }

    fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(PAYLOAD_LEN);
        payload.push(self.kind.type_bits() << 3);
        payload.extend_from_slice(&self.hash);

        let mut data = convert_bits(&payload, 8, 5, true)
            .expect("8-bit input is always convertible with padding; qed");
        let checksum = create_checksum(&self.prefix, &data);
        data.extend_from_slice(&checksum);

        let mut out = String::with_capacity(self.prefix.len() + 1 + data.len());
        out.push_str(&self.prefix);
        out.push(':');
        out.extend(data.into_iter().map(|d| CHARSET[d as usize] as char));
        out
    }

    fn decode(address: &str) -> Result<Self, Error> {
        let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(Error::MixedCase);
        }

        let address = address.to_ascii_lowercase();
        let (prefix, encoded) = address
            .split_once(':')
            .unwrap_or((ECASH_PREFIX, address.as_str()));

        if prefix.is_empty() {
            return Err(Error::EmptyPrefix);
        }

        let data = encoded
            .chars()
            .map(|c| charset_index(c).ok_or(Error::InvalidChar(c)))
            .collect::<Result<Vec<_>, _>>()?;

        if data.len() <= CHECKSUM_LEN {
            return Err(Error::InvalidLength(data.len()));
        }

        let mut values = expand_prefix(prefix);
        values.extend_from_slice(&data);
        if polymod(&values) != 0 {
            return Err(Error::InvalidChecksum);
        }

        let payload = convert_bits(&data[..data.len() - CHECKSUM_LEN], 5, 8, false)?;
        if payload.len() != PAYLOAD_LEN {
            return Err(Error::InvalidLength(payload.len()));
        }

        let version = payload[0];
        // Size code 0 denotes a 160-bit hash, the only size in use.
        let kind = match version {
            0x00 => AddressKind::P2pkh,
            0x08 => AddressKind::P2sh,
            other => return Err(Error::UnsupportedVersion(other)),
        };

        let hash: [u8; 20] = payload[1..]
            .try_into()
            .expect("payload length checked above; qed");

        Ok(Self::new(prefix, kind, hash))
    }
}

impl fmt::Display for CashAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for CashAddress {
    type Err = Error;

    /// Parses `prefix:payload`. A bare payload is read as an `ecash:` address.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl Serialize for CashAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CashAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn charset_index(c: char) -> Option<u8> {
    CHARSET
        .iter()
        .position(|&x| x as char == c)
        .map(|index| index as u8)
}

/// Lower 5 bits of each prefix character followed by a zero separator.
fn expand_prefix(prefix: &str) -> Vec<u8> {
    prefix
        .bytes()
        .map(|b| b & 0x1f)
        .chain(std::iter::once(0))
        .collect()
}

fn polymod(values: &[u8]) -> u64 {
    let mut chk: u64 = 1;
    for value in values {
        let top = chk >> 35;
        chk = ((chk & 0x07_ffff_ffff) << 5) ^ u64::from(*value);
        for (i, generator) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 != 0 {
                chk ^= generator;
            }
        }
    }
    chk ^ 1
}

fn create_checksum(prefix: &str, data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut values = expand_prefix(prefix);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0u8; CHECKSUM_LEN]);
    let pm = polymod(&values);

    let mut checksum = [0u8; CHECKSUM_LEN];
    for (i, group) in checksum.iter_mut().enumerate() {
        *group = ((pm >> (5 * (CHECKSUM_LEN - 1 - i))) & 0x1f) as u8;
    }
    checksum
}

fn convert_bits(data: &[u8], from: u32, to: u32, pad: bool) -> Result<Vec<u8>, Error> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let max_value: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut ret = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for value in data {
        let v = u32::from(*value);
        if v >> from != 0 {
            return Err(Error::InvalidChar(*value as char));
        }
        acc = ((acc << from) | v) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            ret.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            ret.push(((acc << (to - bits)) & max_value) as u8);
        }
    } else if bits >= from || ((acc << (to - bits)) & max_value) != 0 {
        return Err(Error::InvalidPadding);
    }

    Ok(ret)
}
