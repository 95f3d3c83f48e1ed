//! Stages pertaining to the reading and decoding of channels.
//!
//! The [ChannelReader] stage sits after channel assembly. It decodes the raw bytes of assembled
//! channels into [RawBatch]es, or any other RLP decodable batch type, and tracks the L1 origin
//! the channel data was read from.
//!
//! [RawBatch]: crate::RawBatch

mod channel_reader;
pub use channel_reader::ChannelReader;
