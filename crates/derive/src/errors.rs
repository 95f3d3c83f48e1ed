//! This module contains the errors returned while decoding channels.

use crate::block::BlockId;
use thiserror::Error;

/// A result type for reading from a channel.
pub type ChannelResult<T> = Result<T, ChannelErrorKind>;

/// [crate::ensure] is a short-hand for bubbling up errors in the case of a condition not being met.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

/// A top level filter for channel errors that sorts by how the caller must react.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChannelErrorKind {
    /// The buffered channel is exhausted, or no channel is buffered. The caller should write the
    /// next channel and/or advance the origin before reading again.
    #[error("Not enough data")]
    NotEnoughData,
    /// The channel cannot be decoded. The caller must call
    /// [ChannelReader::next_channel](crate::ChannelReader::next_channel) before reading again.
    #[error("Corrupt channel: {0}")]
    Corrupt(#[source] ChannelError),
    /// The caller broke the origin contract of the reader.
    #[error("Critical error: {0}")]
    Critical(#[from] OriginError),
}

impl ChannelErrorKind {
    /// Returns `true` if the error only signals that more input is required.
    pub const fn is_not_enough_data(&self) -> bool {
        matches!(self, Self::NotEnoughData)
    }

    /// Returns `true` if the current channel must be abandoned.
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}

/// The reason a channel could not be decoded.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ChannelError {
    /// The decompression filter failed.
    #[error("Decompression error: {0}")]
    Decompression(#[from] DecompressionError),
    /// A value ended before its RLP header or payload was complete.
    #[error("Unexpected end of channel inside an RLP value")]
    UnexpectedEof,
    /// A value does not fit in the remaining RLP byte budget of the channel.
    #[error("RLP value of {size} bytes exceeds the remaining channel budget of {remaining} bytes")]
    ValueTooLarge {
        /// The encoded size of the value.
        size: usize,
        /// The bytes left in the channel budget.
        remaining: usize,
    },
    /// Alloy RLP decoding error.
    #[error("RLP error: {0}")]
    AlloyRlpError(alloy_rlp::Error),
    /// A previous read failed and the channel was not abandoned.
    #[error("Channel failed to decode and must be abandoned before reading")]
    Unabandoned,
}

impl ChannelError {
    /// Wrap [self] as a [ChannelErrorKind::Corrupt].
    pub const fn corrupt(self) -> ChannelErrorKind {
        ChannelErrorKind::Corrupt(self)
    }
}

impl From<alloy_rlp::Error> for ChannelError {
    fn from(e: alloy_rlp::Error) -> Self {
        Self::AlloyRlpError(e)
    }
}

/// An error raised by a [Decompressor](crate::traits::Decompressor).
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecompressionError {
    /// The data is too short to hold the compression header.
    #[error("Truncated zlib header")]
    TruncatedHeader,
    /// The header is not a valid zlib header.
    /// The first argument is the CMF byte, and the second argument is the FLG byte.
    #[error("Invalid zlib header: CMF {0:#04x}, FLG {1:#04x}")]
    InvalidHeader(u8, u8),
    /// The stream requires a preset dictionary, which channels never use.
    #[error("Zlib preset dictionaries are not supported")]
    PresetDictionary,
    /// The compressed data or its checksum is invalid.
    #[error("Corrupt deflate data")]
    CorruptData,
    /// The compressed stream ended before its final block.
    #[error("Unexpected end of compressed stream")]
    UnexpectedEof,
}

/// An error in the origin bookkeeping of the caller.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum OriginError {
    /// The next origin does not build on top of the current origin.
    #[error("Next origin {next} does not build on top of current origin {current}, but on {parent}")]
    Discontinuous {
        /// The rejected origin.
        next: BlockId,
        /// The current origin.
        current: BlockId,
        /// The parent claimed by the rejected origin.
        parent: BlockId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;

    #[test]
    fn test_channel_error_kinds() {
        let errors = [
            ChannelError::Decompression(DecompressionError::CorruptData),
            ChannelError::UnexpectedEof,
            ChannelError::ValueTooLarge { size: 2, remaining: 1 },
            ChannelError::AlloyRlpError(alloy_rlp::Error::InputTooShort),
            ChannelError::Unabandoned,
        ];
        for error in errors.into_iter() {
            let kind = error.clone().corrupt();
            assert!(kind.is_corrupt());
            assert!(!kind.is_not_enough_data());
            assert_eq!(kind, ChannelErrorKind::Corrupt(error));
        }
        assert!(ChannelErrorKind::NotEnoughData.is_not_enough_data());
    }

    #[test]
    fn test_origin_error_display() {
        let err = OriginError::Discontinuous {
            next: BlockId { hash: B256::with_last_byte(3), number: 3 },
            current: BlockId { hash: B256::with_last_byte(1), number: 1 },
            parent: BlockId { hash: B256::with_last_byte(2), number: 2 },
        };
        let kind = ChannelErrorKind::from(err);
        assert!(matches!(kind, ChannelErrorKind::Critical(_)));
        let message = alloc::format!("{kind}");
        assert!(message.contains("does not build on top of current origin"));
    }
}
