//! Contains the [RlpStream], which decodes consecutive RLP values from a [Decompressor].

use crate::{
    ensure,
    errors::{ChannelError, DecompressionError},
    params::STREAM_CHUNK_SIZE,
    traits::Decompressor,
};
use alloc::vec::Vec;
use alloy_primitives::Bytes;
use alloy_rlp::{Decodable, EMPTY_LIST_CODE, EMPTY_STRING_CODE};

/// The last prefix byte of a short RLP string.
const SHORT_STRING_MAX: u8 = 0xB7;

/// The last prefix byte of a long RLP string.
const LONG_STRING_MAX: u8 = 0xBF;

/// The last prefix byte of a short RLP list.
const SHORT_LIST_MAX: u8 = 0xF7;

/// Decodes RLP values one at a time from the output of a [Decompressor].
///
/// Only the bytes of the value being decoded are buffered. The total number of decompressed
/// bytes read from a channel is bounded by the limit given at construction.
#[derive(Debug)]
pub struct RlpStream<D> {
    /// The decompressor feeding the stream.
    source: D,
    /// Decompressed bytes that have not been decoded yet.
    buffer: Vec<u8>,
    /// The maximum number of decompressed bytes read per channel.
    limit: usize,
    /// The bytes left in the budget of the current channel.
    remaining: usize,
    /// Whether the decompressor reached the end of its stream.
    exhausted: bool,
}

impl<D: Decompressor> RlpStream<D> {
    /// Creates a new [RlpStream] reading at most `limit` decompressed bytes from `source`.
    pub const fn new(source: D, limit: usize) -> Self {
        Self { source, buffer: Vec::new(), limit, remaining: limit, exhausted: false }
    }

    /// Resets the stream and its decompressor onto a new channel.
    pub fn reset(&mut self, data: Bytes) -> Result<(), DecompressionError> {
        self.buffer.clear();
        self.remaining = self.limit;
        self.exhausted = false;
        self.source.reset(data)
    }

    /// Returns the bytes left in the budget of the current channel.
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Decodes the next value of the stream.
    ///
    /// Returns `Ok(None)` if the channel ends, or its budget is used up, at a value boundary.
    pub fn decode<T: Decodable>(&mut self) -> Result<Option<T>, ChannelError> {
        if self.remaining == 0 || !self.fill(1)? {
            return Ok(None);
        }

        let header_len = header_len(self.buffer[0]);
        ensure!(self.fill(header_len)?, ChannelError::UnexpectedEof);
        let size = encoded_size(&self.buffer[..header_len.max(1)]).unwrap_or(usize::MAX);
        ensure!(
            size <= self.remaining,
            ChannelError::ValueTooLarge { size, remaining: self.remaining }
        );
        ensure!(self.fill(size)?, ChannelError::UnexpectedEof);

        let mut item = &self.buffer[..size];
        let value = T::decode(&mut item)?;
        ensure!(item.is_empty(), ChannelError::AlloyRlpError(alloy_rlp::Error::UnexpectedLength));

        self.buffer.drain(..size);
        self.remaining -= size;
        Ok(Some(value))
    }

    /// Pulls from the decompressor until at least `needed` bytes are buffered.
    ///
    /// Returns `Ok(false)` if the decompressor ends first.
    fn fill(&mut self, needed: usize) -> Result<bool, ChannelError> {
        while self.buffer.len() < needed {
            if self.exhausted {
                return Ok(false);
            }
            let len = self.buffer.len();
            self.buffer.resize(len + STREAM_CHUNK_SIZE, 0);
            match self.source.read(&mut self.buffer[len..]) {
                Ok(0) => {
                    self.buffer.truncate(len);
                    self.exhausted = true;
                }
                Ok(n) => self.buffer.truncate(len + n),
                Err(e) => {
                    self.buffer.truncate(len);
                    return Err(e.into());
                }
            }
        }
        Ok(true)
    }
}

/// Returns the length of the RLP header that starts with the prefix byte `first`.
///
/// Single byte values carry no header.
const fn header_len(first: u8) -> usize {
    match first {
        0x00..EMPTY_STRING_CODE => 0,
        EMPTY_STRING_CODE..=SHORT_STRING_MAX | EMPTY_LIST_CODE..=SHORT_LIST_MAX => 1,
        0xB8..=LONG_STRING_MAX => 1 + (first - SHORT_STRING_MAX) as usize,
        0xF8..=0xFF => 1 + (first - SHORT_LIST_MAX) as usize,
    }
}

/// Returns the full encoded size of the RLP value whose header is `header`.
///
/// Canonical encoding is checked later, when the value itself is decoded.
fn encoded_size(header: &[u8]) -> Option<usize> {
    let (&first, len_bytes) = header.split_first()?;
    let payload_length = match first {
        0x00..EMPTY_STRING_CODE => return Some(1),
        EMPTY_STRING_CODE..=SHORT_STRING_MAX => u64::from(first - EMPTY_STRING_CODE),
        EMPTY_LIST_CODE..=SHORT_LIST_MAX => u64::from(first - EMPTY_LIST_CODE),
        _ => len_bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)),
    };
    usize::try_from(payload_length).ok()?.checked_add(header.len())
}
