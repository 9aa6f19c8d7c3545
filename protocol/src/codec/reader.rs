//! Cursor over a byte slice with fixed-width little-endian reads.
//!
//! A [`ByteReader`] is owned by exactly one parse call. It never allocates
//! and never looks ahead: every read consumes its bytes or fails with
//! [`CodecError::Truncated`], leaving the position where the failure was
//! detected. Parsing a composite threads one reader through every field in
//! declaration order.

use super::error::CodecError;

/// A read cursor over wire-format bytes.
///
/// All multi-byte integers are little-endian. Byte arrays are copied
/// verbatim. Widths are properties of the call site, never of the data --
/// nothing on the wire is self-describing.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Wraps a byte slice in a fresh reader positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current offset from the start of the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// `true` once every byte has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a single byte as a signed value.
    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.take(1)?[0] as i8)
    }

    /// Reads a little-endian u16.
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Reads a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads a little-endian u64.
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        let b = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Ok(u64::from_le_bytes(buf))
    }

    /// Reads exactly `N` bytes into a fixed array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let b = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(b);
        Ok(out)
    }

    /// Reads exactly `len` bytes, borrowing from the underlying slice.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        self.take(len)
    }

    /// Reads a u32 reserved field and requires it to be zero.
    pub fn read_reserved_u32(&mut self, field: &'static str) -> Result<(), CodecError> {
        let value = self.read_u32()?;
        if value != 0 {
            return Err(CodecError::NonZeroReserved {
                field,
                value: value as u64,
            });
        }
        Ok(())
    }

    /// Reads a u8 reserved field and requires it to be zero.
    pub fn read_reserved_u8(&mut self, field: &'static str) -> Result<(), CodecError> {
        let value = self.read_u8()?;
        if value != 0 {
            return Err(CodecError::NonZeroReserved {
                field,
                value: value as u64,
            });
        }
        Ok(())
    }

    /// Skips `n` bytes (used for alignment padding between elements).
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.take(n).map(|_| ())
    }
}
