//! Shared eCash primitives.
//!
//! - [`cashaddr`]: the CashAddr address format used by eCash (`ecash:` prefix).
//! - [`script`]: output script classification.
//! - [`amount`]: XEC amount parsing and formatting.
//! - [`chronik`]: the transaction and UTXO shapes returned by the chronik indexer.

pub mod amount;
pub mod cashaddr;
pub mod chronik;
mod error;
pub mod script;
pub mod serde_utils;

pub use self::cashaddr::{AddressKind, CashAddress, ECASH_PREFIX};
pub use self::error::Error;
pub use self::script::{OutputType, classify};
pub use bitcoin::{Script, ScriptBuf};
