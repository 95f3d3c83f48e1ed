//! This module contains the traits at the seams of the channel decoder.

mod decompressor;
pub use decompressor::Decompressor;
