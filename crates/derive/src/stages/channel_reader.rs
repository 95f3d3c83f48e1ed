//! This module contains the `ChannelReader` struct.

use crate::{
    block::BlockInfo,
    codec::{RlpStream, ZlibDecompressor},
    ensure,
    errors::{ChannelError, ChannelErrorKind, ChannelResult, DecompressionError, OriginError},
    params::MAX_RLP_BYTES_PER_CHANNEL,
    traits::Decompressor,
};
use alloy_primitives::{Bytes, B256};
use alloy_rlp::Decodable;
use tracing::{debug, warn};

/// [ChannelReader] is a stateful reader that decodes batches from channels.
///
/// Channels are written to the reader as raw, compressed bytes with
/// [write_channel](ChannelReader::write_channel). The decompression and RLP decoding pipeline is
/// set up lazily on the first [read_batch](ChannelReader::read_batch) after a write, reusing the
/// pipeline of the previous channel when there is one.
///
/// The reader also tracks the L1 origin that made the current channel data available. Batches
/// should be attributed to the origin that is returned by [origin](ChannelReader::origin) at the
/// time they are read.
#[derive(Debug)]
pub struct ChannelReader<D = ZlibDecompressor> {
    /// The L1 origin of the channel data being read.
    origin: BlockInfo,
    /// Whether all channel data of the current origin has been written.
    origin_complete: bool,
    /// The raw bytes of the current channel.
    data: Option<Bytes>,
    /// Whether the pipeline has been set up for the current channel data.
    ready: bool,
    /// Whether a read of the current channel failed.
    corrupt: bool,
    /// The decoding pipeline, kept across channels.
    stream: Option<RlpStream<D>>,
    /// The maximum number of decompressed bytes read per channel.
    max_rlp_bytes: usize,
}

impl<D: Decompressor> Default for ChannelReader<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Decompressor> ChannelReader<D> {
    /// Creates a new [ChannelReader]. The reader should be [reset](ChannelReader::reset) to its
    /// starting origin before use.
    pub const fn new() -> Self {
        Self::with_max_rlp_bytes(MAX_RLP_BYTES_PER_CHANNEL as usize)
    }

    /// Creates a new [ChannelReader] that reads at most `max_rlp_bytes` decompressed bytes from
    /// each channel.
    pub const fn with_max_rlp_bytes(max_rlp_bytes: usize) -> Self {
        Self {
            origin: BlockInfo::new(B256::ZERO, 0, B256::ZERO, 0),
            origin_complete: false,
            data: None,
            ready: false,
            corrupt: false,
            stream: None,
            max_rlp_bytes,
        }
    }

    /// Returns the L1 origin of the channel data being read.
    ///
    /// The origin only changes through [add_origin](ChannelReader::add_origin) or
    /// [reset](ChannelReader::reset), no matter how much channel data is read in between. Note
    /// that the origin might not be canonical anymore by the time the data is processed.
    pub const fn origin(&self) -> BlockInfo {
        self.origin
    }

    /// Advances the reader to the next L1 origin, which must build on top of the current one.
    pub fn add_origin(&mut self, origin: BlockInfo) -> Result<(), OriginError> {
        if !self.origin.is_parent_of(&origin) {
            let err = OriginError::Discontinuous {
                next: origin.id(),
                current: self.origin.id(),
                parent: origin.parent_id(),
            };
            warn!(target: "channel-reader", "Rejected origin: {}", err);
            return Err(err);
        }
        self.origin = origin;
        self.origin_complete = false;
        Ok(())
    }

    /// Marks all channel data of the current origin as written.
    pub fn end_origin(&mut self) {
        self.origin_complete = true;
    }

    /// Returns `true` if all channel data of the current origin has been written.
    pub const fn is_origin_complete(&self) -> bool {
        self.origin_complete
    }

    /// Replaces the current channel with `data`.
    pub fn write_channel(&mut self, data: impl Into<Bytes>) {
        self.data = Some(data.into());
        self.ready = false;
        self.corrupt = false;
    }

    /// Forces the next read to continue with the next channel, resetting any
    /// decoding / decompression state to a fresh start.
    pub fn next_channel(&mut self) {
        self.data = None;
        self.ready = false;
        self.corrupt = false;
    }

    /// Resets the reader to `origin`. The current channel, if any, is read again from its start.
    pub fn reset(&mut self, origin: BlockInfo) {
        self.origin = origin;
        self.ready = false;
        self.corrupt = false;
    }

    /// Reads the next batch from the current channel.
    ///
    /// ## Returns
    /// - `Ok(batch)`: The next batch of the channel.
    /// - `Err(ChannelErrorKind::NotEnoughData)`: No channel is written, or the channel is
    ///   exhausted. The caller should write the next channel and/or advance the origin.
    /// - `Err(ChannelErrorKind::Corrupt(_))`: The channel cannot be decoded. The caller must call
    ///   [next_channel](ChannelReader::next_channel) before reading again.
    pub fn read_batch<T: Decodable>(&mut self) -> ChannelResult<T> {
        ensure!(!self.corrupt, ChannelError::Unabandoned.corrupt());

        // Setting up the pipeline reads the compression header, which may fail.
        if !self.ready {
            let data = self.data.clone().ok_or(ChannelErrorKind::NotEnoughData)?;
            if let Err(e) = self.set_stream(data) {
                warn!(target: "channel-reader", "Failed to set up channel pipeline: {}", e);
                self.corrupt = true;
                return Err(ChannelError::from(e).corrupt());
            }
            self.ready = true;
        }

        let stream = self.stream.as_mut().ok_or(ChannelErrorKind::NotEnoughData)?;
        match stream.decode() {
            Ok(Some(batch)) => Ok(batch),
            Ok(None) => {
                debug!(target: "channel-reader", "Channel exhausted at origin {}", self.origin.id());
                Err(ChannelErrorKind::NotEnoughData)
            }
            Err(e) => {
                warn!(target: "channel-reader", "Corrupt channel at origin {}: {}", self.origin.id(), e);
                self.corrupt = true;
                Err(e.corrupt())
            }
        }
    }

    /// Points the pipeline at `data`, creating it if this is the first channel.
    fn set_stream(&mut self, data: Bytes) -> Result<(), DecompressionError> {
        if let Some(stream) = self.stream.as_mut() {
            debug!(target: "channel-reader", "Resetting channel pipeline");
            return stream.reset(data);
        }
        debug!(target: "channel-reader", "Creating channel pipeline");
        self.stream = Some(RlpStream::new(D::new(data)?, self.max_rlp_bytes));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{compress, new_channel, TestBatch};
    use alloc::{vec, vec::Vec};
    use proptest::prelude::*;

    fn block(n: u8, parent: u8) -> BlockInfo {
        BlockInfo::new(B256::with_last_byte(n), n as u64, B256::with_last_byte(parent), n as u64 * 12)
    }

    fn read_all(reader: &mut ChannelReader) -> (Vec<TestBatch>, ChannelErrorKind) {
        let mut batches = Vec::new();
        loop {
            match reader.read_batch::<TestBatch>() {
                Ok(batch) => batches.push(batch),
                Err(e) => return (batches, e),
            }
        }
    }

    #[test]
    fn test_read_without_channel() {
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelErrorKind::NotEnoughData));
        assert!(reader.stream.is_none());
    }

    #[test]
    fn test_read_two_batches() {
        let batches = vec![TestBatch::new(1, 2), TestBatch::new(2, 0)];
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(new_channel(&batches));

        assert_eq!(reader.read_batch::<TestBatch>().unwrap(), batches[0]);
        assert_eq!(reader.read_batch::<TestBatch>().unwrap(), batches[1]);
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelErrorKind::NotEnoughData));
        // Exhaustion is not a fault, and keeps being reported.
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelErrorKind::NotEnoughData));
    }

    #[test]
    fn test_bad_header_keeps_channel() {
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(Bytes::from_static(&[0x01, 0x02, 0x03]));
        assert_eq!(
            reader.read_batch::<TestBatch>(),
            Err(ChannelError::Decompression(DecompressionError::InvalidHeader(0x01, 0x02)).corrupt())
        );
        assert!(!reader.ready);
        assert!(reader.data.is_some());
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelError::Unabandoned.corrupt()));

        reader.next_channel();
        assert!(reader.data.is_none());
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelErrorKind::NotEnoughData));
    }

    #[test]
    fn test_empty_channel_is_corrupt() {
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(Bytes::new());
        assert_eq!(
            reader.read_batch::<TestBatch>(),
            Err(ChannelError::Decompression(DecompressionError::TruncatedHeader).corrupt())
        );
    }

    #[test]
    fn test_truncated_channel() {
        let batches: Vec<_> = (0..64).map(|i| TestBatch::new(i, 8)).collect();
        let channel = new_channel(&batches);
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(channel.slice(..channel.len() / 2));

        let (read, err) = read_all(&mut reader);
        assert!(err.is_corrupt(), "expected a corrupt channel, got {err:?}");
        assert!(read.len() < batches.len());
        assert_eq!(read[..], batches[..read.len()]);

        // No further reads until the channel is abandoned.
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelError::Unabandoned.corrupt()));
        reader.next_channel();
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelErrorKind::NotEnoughData));

        reader.write_channel(channel);
        let (read, err) = read_all(&mut reader);
        assert_eq!(read, batches);
        assert_eq!(err, ChannelErrorKind::NotEnoughData);
    }

    #[test]
    fn test_corrupt_checksum() {
        let mut channel = new_channel(&[TestBatch::new(1, 1)]).to_vec();
        let last = channel.len() - 1;
        channel[last] ^= 0x01;
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(channel);
        let (_, err) = read_all(&mut reader);
        assert_eq!(err, ChannelError::Decompression(DecompressionError::CorruptData).corrupt());
    }

    #[test]
    fn test_malformed_batch() {
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(compress(&alloy_rlp::encode(42u64)));
        assert_eq!(
            reader.read_batch::<TestBatch>(),
            Err(ChannelError::AlloyRlpError(alloy_rlp::Error::UnexpectedString).corrupt())
        );
    }

    #[test]
    fn test_batch_too_large() {
        let batch = TestBatch::new(1, 4);
        let size = alloy_rlp::encode(&batch).len();
        let mut reader = ChannelReader::<ZlibDecompressor>::with_max_rlp_bytes(size - 1);
        reader.write_channel(new_channel(&[batch]));
        assert_eq!(
            reader.read_batch::<TestBatch>(),
            Err(ChannelError::ValueTooLarge { size, remaining: size - 1 }.corrupt())
        );
    }

    #[test]
    fn test_write_channel_reuses_pipeline() {
        let first = vec![TestBatch::new(1, 1), TestBatch::new(2, 1)];
        let second = vec![TestBatch::new(3, 3)];
        let mut reader = ChannelReader::<ZlibDecompressor>::new();

        reader.write_channel(new_channel(&first));
        assert_eq!(reader.read_batch::<TestBatch>().unwrap(), first[0]);
        let stream = reader.stream.as_ref().map(|s| s as *const RlpStream<_>);

        // Replace the channel before the first one is exhausted.
        reader.write_channel(new_channel(&second));
        assert!(!reader.ready);
        let (read, err) = read_all(&mut reader);
        assert_eq!(read, second);
        assert_eq!(err, ChannelErrorKind::NotEnoughData);
        assert_eq!(reader.stream.as_ref().map(|s| s as *const RlpStream<_>), stream);
    }

    #[test]
    fn test_add_origin() {
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.reset(block(1, 0));
        reader.end_origin();
        assert!(reader.is_origin_complete());

        reader.add_origin(block(2, 1)).unwrap();
        assert_eq!(reader.origin(), block(2, 1));
        assert!(!reader.is_origin_complete());
    }

    #[test]
    fn test_add_discontinuous_origin() {
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.reset(block(1, 0));
        reader.end_origin();

        let next = block(3, 2);
        assert_eq!(
            reader.add_origin(next),
            Err(OriginError::Discontinuous {
                next: next.id(),
                current: block(1, 0).id(),
                parent: next.parent_id(),
            })
        );
        assert_eq!(reader.origin(), block(1, 0));
        assert!(reader.is_origin_complete());
    }

    #[test]
    fn test_origin_stable_across_reads() {
        let batches = vec![TestBatch::new(1, 1), TestBatch::new(2, 1), TestBatch::new(3, 1)];
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.reset(block(1, 0));
        reader.write_channel(new_channel(&batches));

        for expected in &batches {
            assert_eq!(&reader.read_batch::<TestBatch>().unwrap(), expected);
            assert_eq!(reader.origin(), block(1, 0));
        }
        assert_eq!(reader.read_batch::<TestBatch>(), Err(ChannelErrorKind::NotEnoughData));
        assert_eq!(reader.origin(), block(1, 0));

        reader.add_origin(block(2, 1)).unwrap();
        assert_eq!(reader.origin(), block(2, 1));
    }

    #[test]
    fn test_reset_rereads_channel() {
        let batches = vec![TestBatch::new(1, 1), TestBatch::new(2, 1)];
        let mut reader = ChannelReader::<ZlibDecompressor>::new();
        reader.write_channel(new_channel(&batches));
        assert_eq!(reader.read_batch::<TestBatch>().unwrap(), batches[0]);

        reader.end_origin();
        reader.reset(block(9, 8));
        assert_eq!(reader.origin(), block(9, 8));
        assert!(reader.is_origin_complete());
        let (read, _) = read_all(&mut reader);
        assert_eq!(read, batches);
    }

    proptest! {
        #[test]
        fn test_channel_round_trip(
            specs in proptest::collection::vec((any::<u64>(), 0usize..6), 0..32)
        ) {
            let batches: Vec<_> = specs.iter().map(|(n, txs)| TestBatch::new(*n, *txs)).collect();
            let mut reader = ChannelReader::<ZlibDecompressor>::new();
            reader.write_channel(new_channel(&batches));
            let (read, err) = read_all(&mut reader);
            prop_assert_eq!(read, batches);
            prop_assert_eq!(err, ChannelErrorKind::NotEnoughData);
        }
    }
}
