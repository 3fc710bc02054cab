//! eCash command line tools.
//!
//! Resolves alias registrations and computes token airdrops from indexer JSON
//! dumps. Network access is left to the caller: every command reads its input
//! from files.

mod cli;
mod commands;
mod error;

pub use self::cli::run;
pub use self::error::{Error, Result};
