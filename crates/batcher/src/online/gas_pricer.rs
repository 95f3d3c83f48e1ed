//! Contains the [AlloyGasPricer].

use crate::traits::{GasPriceCaps, GasPricer};
use alloy_eips::BlockNumberOrTag;
use alloy_primitives::U256;
use alloy_provider::{Provider, ReqwestProvider};
use alloy_transport::TransportError;
use async_trait::async_trait;
use thiserror::Error;

/// An error of the [AlloyGasPricer].
#[derive(Error, Debug)]
pub enum AlloyGasPricerError {
    /// The RPC request failed.
    #[error("RPC error: {0}")]
    Transport(#[from] TransportError),
    /// The fee history of the latest block carries no base fee.
    #[error("Missing base fee in fee history")]
    MissingBaseFee,
}

/// A [GasPricer] querying the gas prices of the latest L1 block over JSON-RPC.
#[derive(Debug, Clone)]
pub struct AlloyGasPricer {
    /// The inner Ethereum JSON-RPC provider.
    inner: ReqwestProvider,
}

impl AlloyGasPricer {
    /// Creates a new [AlloyGasPricer] with the given alloy provider.
    pub const fn new(inner: ReqwestProvider) -> Self {
        Self { inner }
    }

    /// Creates a new [AlloyGasPricer] from the provided [reqwest::Url].
    pub fn new_http(url: reqwest::Url) -> Self {
        Self::new(ReqwestProvider::new_http(url))
    }

    async fn base_fee(&self) -> Result<u128, AlloyGasPricerError> {
        let history = self.inner.get_fee_history(1, BlockNumberOrTag::Latest, &[]).await?;
        history.base_fee_per_gas.first().copied().ok_or(AlloyGasPricerError::MissingBaseFee)
    }

    async fn tip_cap(&self) -> Result<u128, AlloyGasPricerError> {
        Ok(self.inner.get_max_priority_fee_per_gas().await?)
    }

    async fn blob_base_fee(&self) -> Result<u128, AlloyGasPricerError> {
        Ok(self.inner.get_blob_base_fee().await?)
    }
}

#[async_trait]
impl GasPricer for AlloyGasPricer {
    type Error = AlloyGasPricerError;

    async fn suggest_gas_price_caps(&self) -> Result<GasPriceCaps, Self::Error> {
        let (tip_cap, base_fee, blob_base_fee) =
            tokio::try_join!(self.tip_cap(), self.base_fee(), self.blob_base_fee())?;
        Ok(GasPriceCaps::new(U256::from(tip_cap), U256::from(base_fee), U256::from(blob_base_fee)))
    }
}
