use crate::commands::airdrop::Airdrop;
use crate::commands::alias::Alias;
use crate::commands::tools::Tools;
use crate::error::{Error, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Alias registrations.
    #[command(subcommand)]
    Alias(Alias),

    /// Compute an XEC airdrop to the holders of a token.
    Airdrop(Airdrop),

    /// Utility tools.
    #[command(subcommand)]
    Tools(Tools),
}

/// eCash alias and token tools.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Sets a custom logging filter (syntax: `<target>=<level>`).
    ///
    /// Log levels (least to most verbose) are `error`, `warn`, `info`, `debug`, and `trace`.
    ///
    /// By default, all targets log `info`, or follow `RUST_LOG` when it is set.
    /// The global log level can be set with `-l<level>`.
    ///
    /// Multiple `<target>=<level>` entries can be separated by a comma or given
    /// by repeating the flag, e.g. `-lalias=trace,airdrop=debug`.
    #[arg(short = 'l', long, value_name = "LOG_PATTERN", value_delimiter = ',')]
    pub log: Vec<String>,
}

fn init_logging(log_patterns: &[String]) -> Result<()> {
    let env_filter = if log_patterns.is_empty() {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))
    } else {
        EnvFilter::try_new(log_patterns.join(","))
    }
    .map_err(|err| Error::Input(format!("Invalid log pattern: {err}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))
}

/// Parse and run command line arguments
pub fn run() -> Result<()> {
    let Cli { command, log } = Cli::parse();

    init_logging(&log)?;

    match command {
        Command::Alias(cmd) => cmd.run(),
        Command::Airdrop(cmd) => cmd.run(),
        Command::Tools(cmd) => cmd.run(),
    }
}
