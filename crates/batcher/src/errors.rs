//! This module contains the errors of the batcher channel configuration.

use std::time::Duration;
use thiserror::Error;

/// An error while fetching gas prices for a channel config decision.
///
/// The [DynamicChannelConfig](crate::DynamicChannelConfig) never returns these, it falls back to
/// its latest config instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeQuoteError {
    /// The lifecycle of the channel config provider ended.
    #[error("Gas price query cancelled")]
    Cancelled,
    /// The gas pricer did not answer in time.
    #[error("Gas price query timed out after {0:?}")]
    Timeout(Duration),
    /// The gas pricer failed.
    #[error("Gas pricer error: {0}")]
    Pricer(String),
}

/// An invalid [ChannelConfig](crate::ChannelConfig).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelConfigError {
    /// The target number of frames is zero.
    #[error("The target number of frames must be at least 1")]
    ZeroTargetFrames,
    /// The max frame size cannot hold the frame overhead and any data.
    #[error("Max frame size {0} must be larger than the frame overhead of {overhead} bytes", overhead = crate::params::FRAME_V0_OVERHEAD_SIZE)]
    FrameSizeTooSmall(u64),
    /// A blob frame does not fit into a blob.
    #[error("Max frame size {0} exceeds the blob capacity of {max} bytes", max = crate::params::MAX_BLOB_DATA_SIZE - 1)]
    FrameExceedsBlob(u64),
    /// More blobs are targeted than fit into a block.
    #[error("Target of {0} blobs exceeds the maximum of {max} blobs per block", max = alloy_eips::eip4844::MAX_BLOBS_PER_BLOCK)]
    TooManyBlobs(u64),
    /// Calldata transactions carry a single frame.
    #[error("Multi-frame transactions require blobs")]
    MultiFrameCalldata,
}
