use super::read_json;
use crate::error::Result;
use ecash_alias::{AliasConstants, AliasRegistry, get_alias_txs, resolve_aliases};
use ecash_primitives::CashAddress;
use ecash_primitives::chronik::Tx;
use std::path::{Path, PathBuf};

/// Alias registrations.
#[derive(Debug, clap::Subcommand)]
pub enum Alias {
    /// Resolve the valid alias registrations from a transaction history.
    ///
    /// The history is the JSON array of transactions of the registration
    /// address, as served by the indexer.
    Resolve {
        /// Path to the transaction history.
        #[arg(long, value_name = "PATH")]
        history: PathBuf,

        /// Path to a JSON file overriding the mainnet alias parameters.
        #[arg(long, value_name = "PATH")]
        constants: Option<PathBuf>,

        /// Also print the unconfirmed registrations.
        #[arg(long)]
        pending: bool,
    },

    /// Look up an alias or the aliases owned by an address.
    Lookup {
        /// Path to the transaction history.
        #[arg(long, value_name = "PATH")]
        history: PathBuf,

        /// Path to a JSON file overriding the mainnet alias parameters.
        #[arg(long, value_name = "PATH")]
        constants: Option<PathBuf>,

        /// Alias to look up.
        #[arg(long, conflicts_with = "address", required_unless_present = "address")]
        alias: Option<String>,

        /// Address whose aliases to list.
        #[arg(long)]
        address: Option<CashAddress>,
    },

    /// Print the registration fee of each alias length.
    Prices {
        /// Path to a JSON file overriding the mainnet alias parameters.
        #[arg(long, value_name = "PATH")]
        constants: Option<PathBuf>,
    },
}

fn load_constants(path: Option<&Path>) -> Result<AliasConstants> {
    match path {
        Some(path) => read_json(path),
        None => Ok(AliasConstants::mainnet()),
    }
}

fn resolve(history: &Path, constants: &AliasConstants, pending: bool) -> Result<String> {
    let txs: Vec<Tx> = read_json(history)?;
    let resolution = resolve_aliases(get_alias_txs(&txs, constants), constants);

    tracing::info!(
        "Resolved {} registered and {} pending aliases from {} transactions",
        resolution.registered.len(),
        resolution.pending.len(),
        txs.len()
    );

    let json = if pending {
        serde_json::to_string_pretty(&resolution)?
    } else {
        serde_json::to_string_pretty(&resolution.registered)?
    };

    Ok(json)
}

fn lookup(
    history: &Path,
    constants: AliasConstants,
    alias: Option<&str>,
    address: Option<&CashAddress>,
) -> Result<String> {
    let txs: Vec<Tx> = read_json(history)?;
    let registry = AliasRegistry::from_history(&txs, constants);

    let json = match (alias, address) {
        (Some(alias), _) => serde_json::to_string_pretty(&registry.availability(alias))?,
        (None, Some(address)) => {
            serde_json::to_string_pretty(&registry.aliases_for_address(address))?
        }
        (None, None) => serde_json::to_string_pretty(&registry.registered())?,
    };

    Ok(json)
}

fn prices(constants: &AliasConstants) -> Result<String> {
    Ok(serde_json::to_string_pretty(&constants.price_table())?)
}

impl Alias {
    pub fn run(self) -> Result<()> {
        let output = match self {
            Self::Resolve {
                history,
                constants,
                pending,
            } => resolve(&history, &load_constants(constants.as_deref())?, pending)?,
            Self::Lookup {
                history,
                constants,
                alias,
                address,
            } => lookup(
                &history,
                load_constants(constants.as_deref())?,
                alias.as_deref(),
                address.as_ref(),
            )?,
            Self::Prices { constants } => prices(&load_constants(constants.as_deref())?)?,
        };

        println!("{output}");

        Ok(())
    }
}
