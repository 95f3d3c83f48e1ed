//! Module for the CLI.

use crate::{decode::DecodeCfg, select::SelectCfg};
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

/// Main CLI
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Verbosity level (0-4)
    #[arg(long, short, help = "Verbosity level (0-4)", action = ArgAction::Count)]
    pub v: u8,
    /// The subcommand to run.
    #[clap(subcommand)]
    pub subcommand: KctSubcommand,
}

/// Subcommands for the CLI.
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum KctSubcommand {
    /// Pick the channel config for the current L1 fees.
    Select(SelectCfg),
    /// Decode the RLP values of a compressed channel.
    Decode(DecodeCfg),
}

impl Cli {
    /// Initializes telemetry for the application.
    pub(crate) fn init_telemetry(self) -> Result<Self> {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(match self.v {
                0 => Level::ERROR,
                1 => Level::WARN,
                2 => Level::INFO,
                3 => Level::DEBUG,
                _ => Level::TRACE,
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))?;
        Ok(self)
    }

    /// Runs the subcommand.
    pub(crate) async fn run(&self) -> Result<()> {
        match &self.subcommand {
            KctSubcommand::Select(cfg) => cfg.exec().await,
            KctSubcommand::Decode(cfg) => cfg.exec(),
        }
    }
}
