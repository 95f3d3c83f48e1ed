//! Contains the [Decompressor] trait.

use crate::errors::DecompressionError;
use alloy_primitives::Bytes;

/// A resettable decompressing filter over the raw bytes of a channel.
///
/// A [Decompressor] is created once and then [reset](Decompressor::reset) for every subsequent
/// channel, so that the internal decompression state can be reused across channels.
pub trait Decompressor: Sized {
    /// Creates a new decompressor over `data`, reading any header the format requires.
    fn new(data: Bytes) -> Result<Self, DecompressionError>;

    /// Points the decompressor at a fresh channel, reading any header the format requires.
    fn reset(&mut self, data: Bytes) -> Result<(), DecompressionError>;

    /// Writes decompressed bytes into `buf`, returning the number of bytes written.
    ///
    /// Returns `Ok(0)` once the compressed stream has ended.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecompressionError>;
}
