//! Token distribution tools.
//!
//! - [`airdrop`]: split an XEC amount across the holders of a token, either
//!   pro rata to their balance or equally.
//! - [`send`]: select the token UTXOs covering a send or a burn.

pub mod airdrop;
mod error;
mod holders;
pub mod send;


pub use self::airdrop::{
    Airdrop, AirdropRecipient, calculate_airdrop, calculate_equal_airdrop, get_airdrop_tx,
    get_equal_airdrop_tx,
};
pub use self::error::{Error, Result};
pub use self::holders::TokenHolders;
pub use self::send::{
    TokenBurn, TokenSend, decimalize, get_burn_token_inputs, get_send_token_inputs, undecimalize,
};
