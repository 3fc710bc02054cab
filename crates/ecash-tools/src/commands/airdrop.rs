use super::read_json;
use crate::error::Result;
use ecash_primitives::CashAddress;
use ecash_primitives::chronik::ScriptUtxo;
use num_bigint::BigUint;
use std::path::PathBuf;

/// Compute an XEC airdrop to the holders of a token.
///
/// Prints one `address, xec` line per recipient.
#[derive(Debug, clap::Args)]
pub struct Airdrop {
    /// Path to the JSON array of token UTXOs, as served by the indexer.
    #[arg(long, value_name = "PATH")]
    utxos: PathBuf,

    /// Only count the UTXOs of this token.
    ///
    /// Required when the file holds UTXOs of more than one token.
    #[arg(long, value_name = "TOKEN_ID")]
    token_id: Option<String>,

    /// Total amount to distribute, in XEC.
    #[arg(long, value_name = "XEC")]
    amount: String,

    /// Address left out of the airdrop. Can be repeated.
    #[arg(long, value_name = "ADDRESS")]
    exclude: Vec<CashAddress>,

    /// Minimum token balance to qualify, in undecimalized token units.
    #[arg(long, value_name = "ATOMS", default_value = "0")]
    min_qty: BigUint,

    /// Split the amount equally instead of pro rata to the token balance.
    #[arg(long)]
    equal: bool,

    /// Write the airdrop to a file instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Airdrop {
    fn csv(&self) -> Result<String> {
        let mut utxos: Vec<ScriptUtxo> = read_json(&self.utxos)?;

        if let Some(token_id) = &self.token_id {
            utxos.retain(|utxo| {
                utxo.token
                    .as_ref()
                    .is_some_and(|token| &token.token_id == token_id)
            });
        }

        tracing::debug!(
            target: "airdrop",
            "Computing {} airdrop of {} XEC over {} token utxos",
            if self.equal { "an equal" } else { "a pro rata" },
            self.amount,
            utxos.len()
        );

        let csv = if self.equal {
            ecash_token::get_equal_airdrop_tx(&utxos, &self.exclude, &self.amount, &self.min_qty)?
        } else {
            ecash_token::get_airdrop_tx(&utxos, &self.exclude, &self.amount, &self.min_qty)?
        };

        Ok(csv)
    }

    pub fn run(self) -> Result<()> {
        let csv = self.csv()?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{csv}\n"))?;
                tracing::info!(
                    "Airdrop to {} recipients written to {}",
                    csv.lines().count(),
                    path.display()
                );
            }
            None => println!("{csv}"),
        }

        Ok(())
    }
}
