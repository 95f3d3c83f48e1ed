//! Contains the [ChannelConfig] of the batcher.

use crate::{
    errors::ChannelConfigError,
    params::{FRAME_V0_OVERHEAD_SIZE, MAX_BLOB_DATA_SIZE},
};
use alloy_eips::eip4844::MAX_BLOBS_PER_BLOCK;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The max frame size of the default calldata config.
pub const DEFAULT_CALLDATA_MAX_FRAME_SIZE: u64 = 120_000;

/// The parameters of the channels a batcher builds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// The maximum number of bytes of a single frame, excluding the version byte.
    pub max_frame_size: u64,
    /// The number of frames a channel is filled up to.
    pub target_num_frames: u64,
    /// Whether a single transaction may carry multiple frames.
    pub multi_frame_txs: bool,
    /// Whether frames are submitted as blobs instead of calldata.
    pub use_blobs: bool,
}

impl ChannelConfig {
    /// Returns a calldata config: one frame of up to 120,000 bytes per transaction.
    pub const fn calldata() -> Self {
        Self {
            max_frame_size: DEFAULT_CALLDATA_MAX_FRAME_SIZE,
            target_num_frames: 1,
            multi_frame_txs: false,
            use_blobs: false,
        }
    }

    /// Returns a blob config filling `target_num_frames` blobs per transaction.
    pub const fn blobs(target_num_frames: u64) -> Self {
        Self {
            max_frame_size: MAX_BLOB_DATA_SIZE - 1,
            target_num_frames,
            multi_frame_txs: true,
            use_blobs: true,
        }
    }

    /// Validates the config.
    pub fn check(&self) -> Result<(), ChannelConfigError> {
        if self.target_num_frames == 0 {
            return Err(ChannelConfigError::ZeroTargetFrames);
        }
        if self.max_frame_size <= FRAME_V0_OVERHEAD_SIZE {
            return Err(ChannelConfigError::FrameSizeTooSmall(self.max_frame_size));
        }
        if self.use_blobs {
            if self.max_frame_size > MAX_BLOB_DATA_SIZE - 1 {
                return Err(ChannelConfigError::FrameExceedsBlob(self.max_frame_size));
            }
            if self.target_num_frames > MAX_BLOBS_PER_BLOCK as u64 {
                return Err(ChannelConfigError::TooManyBlobs(self.target_num_frames));
            }
        } else if self.multi_frame_txs {
            return Err(ChannelConfigError::MultiFrameCalldata);
        }
        Ok(())
    }
}
