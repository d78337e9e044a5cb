//! Forward-only cursor over an in-memory RAW4 buffer.
//!
//! All multi-byte fields in the format are little-endian. Every read either
//! consumes exactly the requested number of bytes or fails with
//! [`Raw4Error::Truncated`] and leaves the position untouched.

use byteorder::{ByteOrder, LittleEndian};

use super::error::{Raw4Error, Result};

/// Read position into a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Start a cursor at offset zero.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total buffer length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True once the position has reached the end of the buffer.
    pub fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Raw4Error::Truncated {
                offset: self.pos,
                requested: n,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Advance `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    /// Read an `n`-byte text field.
    ///
    /// Null padding on either side is stripped and invalid UTF-8 is replaced
    /// rather than rejected.
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        let raw = self.take(n)?;
        let start = raw.iter().position(|&b| b != 0).unwrap_or(raw.len());
        let end = raw.iter().rposition(|&b| b != 0).map_or(start, |i| i + 1);
        Ok(String::from_utf8_lossy(&raw[start..end]).into_owned())
    }

    /// Read a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.take(4).map(LittleEndian::read_u32)
    }

    /// Read a little-endian `f32`.
    pub fn read_f32_le(&mut self) -> Result<f32> {
        self.take(4).map(LittleEndian::read_f32)
    }

    /// Read a little-endian `f64`.
    pub fn read_f64_le(&mut self) -> Result<f64> {
        self.take(8).map(LittleEndian::read_f64)
    }
}
