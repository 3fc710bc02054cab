//! eCash alias protocol.
//!
//! An alias registration is a transaction with an OP_RETURN output of the form
//! `OP_RETURN <".xec"> <alias>` that pays the registration fee to the
//! registration address. The first confirmed claim of an alias wins; claims in
//! the same block are ordered by txid.
//!
//! This crate parses registrations out of a transaction history, resolves
//! conflicting claims and answers lookups against the resolved set. All
//! functions are pure: the history is fetched by the caller.

mod constants;
mod parser;
mod registry;
mod resolver;

#[cfg(test)]
mod tests;

pub use self::constants::{
    AliasConstants, AliasPrice, RESERVED_BLOCKHEIGHT, RESERVED_TXID, UNCONFIRMED_BLOCKHEIGHT,
};
pub use self::parser::{
    AliasTx, InvalidAliasTx, ParsedOutput, get_alias_txs, is_valid_alias_string, parse_alias_tx,
    try_parse_alias_tx,
};
pub use self::registry::{AliasAvailability, AliasRegistry};
pub use self::resolver::{
    AliasResolution, get_valid_alias_registrations, resolve_aliases,
    sort_alias_txs_by_txid_and_blockheight,
};
