use ecash_primitives::amount::DUST_SATS;
use num_bigint::BigUint;

pub type Result<T> = std::result::Result<T, Error>;

/// Token tool errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("No token holders with more than the minimum amount specified")]
    NoEligibleHolders,
    #[error(
        "No token holder would receive the minimum of {} sats, increase the airdrop amount",
        DUST_SATS
    )]
    AirdropAmountTooLow,
    #[error(
        "Each of {holders} holders would receive {per_holder_sats} sats, below the minimum of {} sats, increase the airdrop amount",
        DUST_SATS
    )]
    EqualAirdropBelowDust { holders: usize, per_holder_sats: u64 },
    /// Balances of different tokens are not comparable.
    #[error("Token utxos mix token {first} with token {second}, airdrop one token at a time")]
    MixedTokens { first: String, second: String },
    #[error("Invalid token quantity {qty:?}: {reason}")]
    InvalidTokenQty { qty: String, reason: &'static str },
    #[error("Token utxos have insufficient balance {available} to {action} {requested}")]
    InsufficientTokenBalance {
        action: &'static str,
        available: BigUint,
        requested: BigUint,
    },
    #[error(transparent)]
    Primitives(#[from] ecash_primitives::Error),
}
