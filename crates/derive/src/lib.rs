#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(any(test, feature = "test-utils")), warn(unused_crate_dependencies))]

extern crate alloc;

/// Re-export commonly used types and traits.
pub mod prelude {
    pub use crate::{
        block::{BlockId, BlockInfo},
        codec::{RawBatch, RlpStream, ZlibDecompressor},
        errors::{ChannelError, ChannelErrorKind, ChannelResult, DecompressionError, OriginError},
        stages::ChannelReader,
        traits::Decompressor,
    };
}

pub mod block;
pub mod codec;
pub mod errors;
pub mod params;
pub mod stages;
pub mod traits;

pub use block::{BlockId, BlockInfo};
pub use codec::RawBatch;
pub use stages::ChannelReader;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
