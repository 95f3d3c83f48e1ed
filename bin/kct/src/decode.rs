//! The `decode` subcommand.

use alloy_primitives::{hex, Bytes};
use anyhow::{anyhow, Result};
use clap::Args;
use kona_channel_derive::{errors::ChannelErrorKind, ChannelReader, RawBatch};
use std::path::PathBuf;
use tracing::info;

/// Configuration for decoding a channel.
#[derive(Debug, Clone, Args)]
pub(crate) struct DecodeCfg {
    /// A file holding the hex-encoded compressed channel.
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

impl DecodeCfg {
    /// Decodes the channel and prints every value as hex, one per line.
    pub(crate) fn exec(&self) -> Result<()> {
        let contents = std::fs::read_to_string(&self.file)?;
        let channel = hex::decode(contents.trim())?;
        let batches = decode_channel(channel.into())?;
        info!(target: "kct", count = batches.len(), "Decoded channel");
        for batch in batches {
            println!("{}", batch.encoded());
        }
        Ok(())
    }
}

/// Reads every value of a compressed channel.
pub(crate) fn decode_channel(channel: Bytes) -> Result<Vec<RawBatch>> {
    let mut reader: ChannelReader = ChannelReader::new();
    reader.write_channel(channel);
    let mut batches = Vec::new();
    loop {
        match reader.read_batch::<RawBatch>() {
            Ok(batch) => batches.push(batch),
            Err(ChannelErrorKind::NotEnoughData) => return Ok(batches),
            Err(e) => return Err(anyhow!("Failed to decode channel: {}", e)),
        }
    }
}
