//! The `select` subcommand.

use anyhow::Result;
use clap::Args;
use kona_batcher::{
    config::DEFAULT_CALLDATA_MAX_FRAME_SIZE, online::AlloyGasPricer, ChannelConfig,
    ChannelConfigProvider, DynamicChannelConfig,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Configuration for the channel config selection.
#[derive(Debug, Clone, Args)]
pub(crate) struct SelectCfg {
    /// The L1 JSON-RPC endpoint.
    #[arg(long, env = "L1_RPC_URL")]
    pub l1_rpc_url: reqwest::Url,
    /// The limit of the gas price query, in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
    /// The number of blobs per blob transaction.
    #[arg(long, default_value_t = 1)]
    pub target_num_frames: u64,
    /// The max frame size of calldata transactions.
    #[arg(long, default_value_t = DEFAULT_CALLDATA_MAX_FRAME_SIZE)]
    pub calldata_max_frame_size: u64,
}

impl SelectCfg {
    /// Returns the blob and calldata configs, validated.
    pub(crate) fn configs(&self) -> Result<(ChannelConfig, ChannelConfig)> {
        let blob_config = ChannelConfig::blobs(self.target_num_frames);
        blob_config.check()?;
        let calldata_config =
            ChannelConfig { max_frame_size: self.calldata_max_frame_size, ..ChannelConfig::calldata() };
        calldata_config.check()?;
        Ok((blob_config, calldata_config))
    }

    /// Picks a channel config and prints it as JSON.
    pub(crate) async fn exec(&self) -> Result<()> {
        let (blob_config, calldata_config) = self.configs()?;

        let lifecycle = CancellationToken::new();
        let on_interrupt = lifecycle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!(target: "kct", "Interrupted, cancelling gas price query");
                on_interrupt.cancel();
            }
        });

        info!(target: "kct", url = %self.l1_rpc_url, "Selecting channel config");
        let mut provider = DynamicChannelConfig::new(
            AlloyGasPricer::new_http(self.l1_rpc_url.clone()),
            lifecycle,
            Duration::from_secs(self.timeout),
            blob_config,
            calldata_config,
        );
        let config = provider.channel_config().await;
        println!("{}", serde_json::to_string_pretty(&config)?);
        Ok(())
    }
}
