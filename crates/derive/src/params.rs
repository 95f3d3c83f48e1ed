//! This module contains the protocol parameters of the channel decoder.

/// [MAX_RLP_BYTES_PER_CHANNEL] is the maximum amount of bytes that will be read from
/// a channel. This limit is set when decoding the RLP.
pub const MAX_RLP_BYTES_PER_CHANNEL: u64 = 10_000_000;

/// The number of decompressed bytes pulled from the decompressor at a time.
pub const STREAM_CHUNK_SIZE: usize = 4096;
