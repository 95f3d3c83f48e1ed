//! This module contains the traits at the seams of the batcher channel configuration.

use crate::config::ChannelConfig;
use alloy_primitives::U256;
use async_trait::async_trait;
use core::fmt::Display;

/// The L1 fee market at the time of a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasPriceCaps {
    /// The priority fee cap.
    pub tip_cap: U256,
    /// The base fee.
    pub base_fee: U256,
    /// The blob base fee.
    pub blob_base_fee: U256,
}

impl GasPriceCaps {
    /// Creates a new [GasPriceCaps].
    pub const fn new(tip_cap: U256, base_fee: U256, blob_base_fee: U256) -> Self {
        Self { tip_cap, base_fee, blob_base_fee }
    }
}

/// Describes the functionality of a source of L1 gas prices.
#[async_trait]
pub trait GasPricer {
    /// The error type for the [GasPricer].
    type Error: Display + Send;

    /// Returns the current tip cap, base fee and blob base fee.
    async fn suggest_gas_price_caps(&self) -> Result<GasPriceCaps, Self::Error>;
}

/// Provides the [ChannelConfig] for the next channel.
#[async_trait]
pub trait ChannelConfigProvider {
    /// Returns the [ChannelConfig] to use for the next channel.
    async fn channel_config(&mut self) -> ChannelConfig;
}

#[async_trait]
impl ChannelConfigProvider for ChannelConfig {
    async fn channel_config(&mut self) -> ChannelConfig {
        *self
    }
}
