//! Test utilities for the channel config selection.

use crate::traits::{GasPriceCaps, GasPricer};
use alloy_primitives::U256;
use async_trait::async_trait;
use spin::Mutex;
use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};
use thiserror::Error;

mod tracing;
pub use tracing::{CollectingLayer, LoggedEvent, TraceStorage};

/// Returns [GasPriceCaps] from plain integers.
pub fn gas_price_caps(tip_cap: u64, base_fee: u64, blob_base_fee: u64) -> GasPriceCaps {
    GasPriceCaps::new(U256::from(tip_cap), U256::from(base_fee), U256::from(blob_base_fee))
}

/// A scripted answer of the [TestGasPricer].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestGasPrice {
    /// Answer with the given caps.
    Caps(GasPriceCaps),
    /// Answer with the given caps after a delay.
    Delayed(GasPriceCaps, Duration),
    /// Fail.
    Error,
    /// Never answer.
    Hang,
}

/// The error returned by the [TestGasPricer].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestGasPricerError {
    /// A scripted failure.
    #[error("Test gas pricer failure")]
    Scripted,
    /// No answers are left.
    #[error("Test gas pricer has no answers left")]
    Exhausted,
}

/// A [GasPricer] replaying scripted answers in order.
#[derive(Debug, Default)]
pub struct TestGasPricer {
    answers: Mutex<VecDeque<TestGasPrice>>,
    calls: AtomicUsize,
}

impl TestGasPricer {
    /// Creates a new [TestGasPricer] answering with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = TestGasPrice>) -> Self {
        Self { answers: Mutex::new(answers.into_iter().collect()), calls: AtomicUsize::new(0) }
    }

    /// Appends an answer.
    pub fn push(&self, answer: TestGasPrice) {
        self.answers.lock().push_back(answer);
    }

    /// Returns how often the pricer was queried.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GasPricer for TestGasPricer {
    type Error = TestGasPricerError;

    async fn suggest_gas_price_caps(&self) -> Result<GasPriceCaps, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self.answers.lock().pop_front();
        match answer {
            Some(TestGasPrice::Caps(caps)) => Ok(caps),
            Some(TestGasPrice::Delayed(caps, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(caps)
            }
            Some(TestGasPrice::Error) => Err(TestGasPricerError::Scripted),
            Some(TestGasPrice::Hang) => std::future::pending().await,
            None => Err(TestGasPricerError::Exhausted),
        }
    }
}
