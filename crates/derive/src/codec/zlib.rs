//! Contains the [ZlibDecompressor], a streaming zlib [Decompressor].

use crate::{errors::DecompressionError, traits::Decompressor};
use alloc::boxed::Box;
use alloy_primitives::Bytes;
use miniz_oxide::{
    inflate::stream::{inflate, InflateState},
    DataFormat, MZError, MZFlush, MZStatus,
};

/// ZLIB Deflate Compression Method.
pub const ZLIB_DEFLATE_COMPRESSION_METHOD: u8 = 8;

/// The largest window size info a zlib header may declare (32 KiB window).
const ZLIB_MAX_COMPRESSION_INFO: u8 = 7;

/// The preset dictionary flag of the zlib FLG byte.
const ZLIB_FDICT_FLAG: u8 = 0x20;

/// A streaming zlib [Decompressor] backed by a reusable [InflateState].
pub struct ZlibDecompressor {
    /// The inflate state, kept across channels.
    state: Box<InflateState>,
    /// The compressed channel data.
    data: Bytes,
    /// The number of compressed bytes consumed so far.
    cursor: usize,
    /// Whether the end of the zlib stream was reached.
    finished: bool,
    /// An error held back until the bytes written before it have been returned.
    pending_error: Option<DecompressionError>,
}

impl core::fmt::Debug for ZlibDecompressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ZlibDecompressor")
            .field("len", &self.data.len())
            .field("cursor", &self.cursor)
            .field("finished", &self.finished)
            .field("pending_error", &self.pending_error)
            .finish()
    }
}

impl ZlibDecompressor {
    /// Validates the two byte zlib header at the start of `data`.
    pub fn check_header(data: &[u8]) -> Result<(), DecompressionError> {
        let &[cmf, flg, ..] = data else {
            return Err(DecompressionError::TruncatedHeader);
        };
        if cmf & 0x0F != ZLIB_DEFLATE_COMPRESSION_METHOD
            || cmf >> 4 > ZLIB_MAX_COMPRESSION_INFO
            || (u16::from(cmf) << 8 | u16::from(flg)) % 31 != 0
        {
            return Err(DecompressionError::InvalidHeader(cmf, flg));
        }
        if flg & ZLIB_FDICT_FLAG != 0 {
            return Err(DecompressionError::PresetDictionary);
        }
        Ok(())
    }

    /// Returns the number of compressed bytes consumed so far.
    pub const fn consumed(&self) -> usize {
        self.cursor
    }

    /// Returns `true` once the end of the zlib stream has been reached.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Holds `err` back if bytes were written in the same call.
    fn fail(&mut self, written: usize, err: DecompressionError) -> Result<usize, DecompressionError> {
        if written > 0 {
            self.pending_error = Some(err);
            return Ok(written);
        }
        Err(err)
    }
}

impl Decompressor for ZlibDecompressor {
    fn new(data: Bytes) -> Result<Self, DecompressionError> {
        Self::check_header(&data)?;
        Ok(Self {
            state: InflateState::new_boxed(DataFormat::Zlib),
            data,
            cursor: 0,
            finished: false,
            pending_error: None,
        })
    }

    fn reset(&mut self, data: Bytes) -> Result<(), DecompressionError> {
        Self::check_header(&data)?;
        self.state.reset(DataFormat::Zlib);
        self.data = data;
        self.cursor = 0;
        self.finished = false;
        self.pending_error = None;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecompressionError> {
        if let Some(err) = self.pending_error {
            return Err(err);
        }
        if self.finished || buf.is_empty() {
            return Ok(0);
        }

        loop {
            let res = inflate(&mut self.state, &self.data[self.cursor..], buf, MZFlush::None);
            self.cursor += res.bytes_consumed;

            match res.status {
                Ok(MZStatus::StreamEnd) => {
                    self.finished = true;
                    return Ok(res.bytes_written);
                }
                Ok(MZStatus::Ok) if res.bytes_written > 0 => return Ok(res.bytes_written),
                Ok(MZStatus::Ok) if res.bytes_consumed > 0 => continue,
                // No input left and no progress: the stream is truncated.
                Ok(MZStatus::Ok) | Err(MZError::Buf) => {
                    return self.fail(res.bytes_written, DecompressionError::UnexpectedEof)
                }
                Ok(MZStatus::NeedDict) => {
                    return self.fail(res.bytes_written, DecompressionError::PresetDictionary)
                }
                Err(_) => return self.fail(res.bytes_written, DecompressionError::CorruptData),
            }
        }
    }
}
