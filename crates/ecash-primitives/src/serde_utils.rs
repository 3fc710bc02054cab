//! Serde adapters for the indexer's JSON encoding.

use serde::{Deserialize, Deserializer, Serializer};

/// Some indexer versions send numbers as JSON strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

/// `u64` encoded as a JSON number or a decimal string.
pub mod u64_or_string {
    use super::*;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Arbitrary precision unsigned integer encoded as a JSON number or a decimal string.
pub mod biguint_or_string {
    use super::*;
    use num_bigint::BigUint;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(BigUint::from(n)),
            NumberOrString::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Fixed size byte array encoded as hex.
pub mod hex_array {
    use super::*;

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(<D::Error as serde::de::Error>::custom)?;
        bytes.try_into().map_err(|bytes: Vec<u8>| {
            serde::de::Error::custom(format!("expected {N} bytes, got {}", bytes.len()))
        })
    }
}

/// Script encoded as hex.
pub mod hex_script {
    use super::*;
    use bitcoin::ScriptBuf;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ScriptBuf, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s)
            .map(ScriptBuf::from_bytes)
            .map_err(serde::de::Error::custom)
    }
}

/// Optional script encoded as hex, absent for coinbase inputs.
pub mod option_hex_script {
    use super::*;
    use bitcoin::ScriptBuf;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ScriptBuf>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                hex::decode(&s)
                    .map(ScriptBuf::from_bytes)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
