//! This module contains the protocol parameters used to price channels.

/// The intrinsic gas of every transaction.
pub const TX_GAS: u64 = 21_000;

/// The gas charged per non-zero byte of calldata since EIP-2028.
///
/// Compressed channel data has very few zero bytes, so every byte is priced at this rate.
pub const TX_DATA_NON_ZERO_GAS_EIP2028: u64 = 16;

/// The number of channel data bytes that fit in a single blob.
pub const MAX_BLOB_DATA_SIZE: u64 = (4 * 31 + 3) * 1024 - 4;

/// The size of the version byte that prefixes the frames of a batcher transaction.
pub const DERIVATION_VERSION_BYTE_SIZE: u64 = 1;

/// The overhead of a version 0 frame: channel id (16), frame number (2), data length (4) and
/// the is-last flag (1).
pub const FRAME_V0_OVERHEAD_SIZE: u64 = 23;
