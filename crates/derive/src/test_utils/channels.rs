//! Helpers to build compressed channels.

use alloc::{vec, vec::Vec};
use alloy_primitives::{Bytes, B256};
use alloy_rlp::{Encodable, RlpDecodable, RlpEncodable};
use miniz_oxide::deflate::compress_to_vec_zlib;

/// The zlib compression level used by the helpers.
const COMPRESSION_LEVEL: u8 = 6;

/// A batch shaped like a singular batch, used to fill test channels.
#[derive(Debug, Clone, PartialEq, Eq, RlpEncodable, RlpDecodable)]
pub struct TestBatch {
    /// The parent hash of the batch.
    pub parent_hash: B256,
    /// The epoch number of the batch.
    pub epoch_num: u64,
    /// The timestamp of the batch.
    pub timestamp: u64,
    /// The transactions of the batch.
    pub transactions: Vec<Bytes>,
}

impl TestBatch {
    /// Creates a deterministic [TestBatch] from `seed` with `tx_count` transactions.
    pub fn new(seed: u64, tx_count: usize) -> Self {
        let transactions = (0..tx_count)
            .map(|i| Bytes::from(vec![(seed as u8).wrapping_add(i as u8); 32 + i * 16]))
            .collect();
        Self {
            parent_hash: B256::left_padding_from(&seed.to_be_bytes()),
            epoch_num: seed / 6,
            timestamp: seed.wrapping_mul(2),
            transactions,
        }
    }
}

/// Compresses `raw` with zlib.
pub fn compress(raw: &[u8]) -> Bytes {
    compress_to_vec_zlib(raw, COMPRESSION_LEVEL).into()
}

/// RLP encodes `items` back to back and compresses the result into a channel.
pub fn new_channel<T: Encodable>(items: &[T]) -> Bytes {
    let mut raw = Vec::new();
    for item in items {
        item.encode(&mut raw);
    }
    compress(&raw)
}
