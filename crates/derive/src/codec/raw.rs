//! Contains the [RawBatch] type.

use alloy_primitives::Bytes;
use alloy_rlp::{BufMut, Decodable, Encodable, Header, EMPTY_LIST_CODE};

/// A single RLP value read from a channel, kept in its encoded form.
///
/// The [ChannelReader](crate::ChannelReader) does not interpret the values inside a channel. A
/// [RawBatch] lets a caller split a channel into its values and decode them later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBatch(pub Bytes);

impl RawBatch {
    /// Returns the full RLP encoding of the value, including its header.
    pub const fn encoded(&self) -> &Bytes {
        &self.0
    }

    /// Returns `true` if the value is an RLP list.
    pub fn is_list(&self) -> bool {
        self.0.first().is_some_and(|b| *b >= EMPTY_LIST_CODE)
    }
}

impl Decodable for RawBatch {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        let start = *buf;
        let header = Header::decode(buf)?;
        // Single byte values are their own header, and are not consumed by the header decoding.
        *buf = &buf[header.payload_length..];
        let size = start.len() - buf.len();
        Ok(Self(Bytes::copy_from_slice(&start[..size])))
    }
}

impl Encodable for RawBatch {
    fn encode(&self, out: &mut dyn BufMut) {
        out.put_slice(&self.0);
    }

    fn length(&self) -> usize {
        self.0.len()
    }
}
