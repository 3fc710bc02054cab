use crate::error::{Error, Result};
use bitcoin::blockdata::script::Script;
use ecash_primitives::{CashAddress, ECASH_PREFIX};

/// Utilities
#[derive(Debug, clap::Subcommand)]
pub enum Tools {
    /// Derive the address an output script pays to.
    ///
    /// Only P2PKH and P2SH scripts have an address.
    #[command(name = "script-to-address")]
    ScriptToAddress {
        /// Hex-encoded output script, optionally `0x`-prefixed.
        #[arg(index = 1)]
        script: String,

        /// Address prefix.
        #[arg(long, default_value = ECASH_PREFIX)]
        prefix: String,
    },

    /// Print the output script paying to an address.
    ///
    /// The prefix may be omitted, in which case `ecash:` is assumed.
    #[command(name = "address-to-script")]
    AddressToScript {
        #[arg(index = 1)]
        address: String,
    },
}

fn script_to_address(input: &str, prefix: &str) -> Result<CashAddress> {
    let str_without_0x = input.strip_prefix("0x").unwrap_or(input);

    let script_bytes = hex::decode(str_without_0x)
        .map_err(|err| Error::Input(format!("Invalid script hex: {err}")))?;

    let script = Script::from_bytes(&script_bytes);
    tracing::debug!("Parsed script: {script:?}");

    Ok(CashAddress::from_output_script(script)?.with_prefix(prefix))
}

fn address_to_script(input: &str) -> Result<String> {
    let address: CashAddress = input.parse()?;
    Ok(hex::encode(address.output_script().as_bytes()))
}

impl Tools {
    pub fn run(self) -> Result<()> {
        match self {
            Self::ScriptToAddress { script, prefix } => {
                println!("{}", script_to_address(&script, &prefix)?);
            }
            Self::AddressToScript { address } => {
                println!("{}", address_to_script(&address)?);
            }
        }
        Ok(())
    }
}
