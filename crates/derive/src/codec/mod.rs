//! The decoding pipeline that turns raw channel bytes into RLP values.
//!
//! Raw channel bytes flow through a [Decompressor] (zlib, by default) into an [RlpStream], which
//! pulls just enough decompressed bytes to decode the next RLP value. Both layers can be reset
//! onto a new channel without reallocating their internal state.
//!
//! [Decompressor]: crate::traits::Decompressor

mod zlib;
pub use zlib::{ZlibDecompressor, ZLIB_DEFLATE_COMPRESSION_METHOD};

mod rlp;
pub use rlp::RlpStream;

mod raw;
pub use raw::RawBatch;
