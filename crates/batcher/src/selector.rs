//! Contains the [DynamicChannelConfig], which picks calldata or blob channels by L1 fees.

use crate::{
    config::ChannelConfig,
    cost::ChannelCostEstimate,
    errors::FeeQuoteError,
    traits::{ChannelConfigProvider, GasPriceCaps, GasPricer},
};
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// A [ChannelConfigProvider] switching between a calldata and a blob [ChannelConfig], whichever is
/// cheaper per byte at the current L1 fees.
///
/// When the fees cannot be fetched, the config of the last successful decision is returned. Before
/// the first decision that is the blob config.
#[derive(Debug)]
pub struct DynamicChannelConfig<G: GasPricer> {
    /// The source of gas prices.
    gas_pricer: G,
    /// Ends pending gas price queries when cancelled.
    lifecycle: CancellationToken,
    /// The limit of a single gas price query.
    timeout: Duration,
    /// The config used when blobs are cheaper.
    blob_config: ChannelConfig,
    /// The config used when calldata is cheaper.
    calldata_config: ChannelConfig,
    /// The config of the last decision.
    latest_config: ChannelConfig,
}

impl<G: GasPricer + Send + Sync> DynamicChannelConfig<G> {
    /// Creates a new [DynamicChannelConfig].
    pub const fn new(
        gas_pricer: G,
        lifecycle: CancellationToken,
        timeout: Duration,
        blob_config: ChannelConfig,
        calldata_config: ChannelConfig,
    ) -> Self {
        Self {
            gas_pricer,
            lifecycle,
            timeout,
            blob_config,
            calldata_config,
            latest_config: blob_config,
        }
    }

    /// Returns the config of the last decision.
    pub const fn latest_config(&self) -> ChannelConfig {
        self.latest_config
    }

    /// Returns the blob config.
    pub const fn blob_config(&self) -> ChannelConfig {
        self.blob_config
    }

    /// Returns the calldata config.
    pub const fn calldata_config(&self) -> ChannelConfig {
        self.calldata_config
    }

    /// Returns a reference to the gas pricer.
    pub const fn gas_pricer(&self) -> &G {
        &self.gas_pricer
    }

    /// Queries the gas pricer, bounded by the timeout and the lifecycle.
    async fn fetch_gas_price_caps(&self) -> Result<GasPriceCaps, FeeQuoteError> {
        tokio::select! {
            biased;
            _ = self.lifecycle.cancelled() => Err(FeeQuoteError::Cancelled),
            res = tokio::time::timeout(self.timeout, self.gas_pricer.suggest_gas_price_caps()) => {
                match res {
                    Ok(Ok(caps)) => Ok(caps),
                    Ok(Err(e)) => Err(FeeQuoteError::Pricer(e.to_string())),
                    Err(_) => Err(FeeQuoteError::Timeout(self.timeout)),
                }
            }
        }
    }
}

#[async_trait]
impl<G: GasPricer + Send + Sync> ChannelConfigProvider for DynamicChannelConfig<G> {
    async fn channel_config(&mut self) -> ChannelConfig {
        let caps = match self.fetch_gas_price_caps().await {
            Ok(caps) => caps,
            Err(e) => {
                warn!(
                    target: "channel-config",
                    "Error querying gas prices, returning latest config: {}", e
                );
                return self.latest_config;
            }
        };

        let estimate = ChannelCostEstimate::new(&self.calldata_config, &self.blob_config, &caps);
        let (config, kind) = if estimate.prefers_calldata() {
            (self.calldata_config, "calldata")
        } else {
            (self.blob_config, "blob")
        };
        info!(
            target: "channel-config",
            base_fee = %caps.base_fee,
            blob_base_fee = %caps.blob_base_fee,
            tip_cap = %caps.tip_cap,
            calldata_bytes = %estimate.calldata_bytes,
            calldata_cost = %estimate.calldata_cost,
            blob_data_bytes = %estimate.blob_data_bytes,
            blob_cost = %estimate.blob_cost,
            "Using {} channel config", kind
        );

        self.latest_config = config;
        config
    }
}
