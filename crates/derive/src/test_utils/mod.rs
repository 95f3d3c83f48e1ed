//! Test Utilities for `kona-channel-derive`.

mod channels;
pub use channels::{compress, new_channel, TestBatch};
