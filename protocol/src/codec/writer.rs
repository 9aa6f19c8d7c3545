//! Append-only output buffer with fixed-width little-endian writes.
//!
//! The writer is deliberately infallible: the only way a serialize can go
//! wrong is a descriptor whose `size()` disagrees with what it wrote, and
//! that is caught by [`Entity::to_bytes`](super::Entity::to_bytes) after
//! the fact as a [`SizeMismatch`](super::CodecError::SizeMismatch).

/// A write buffer for wire-format bytes.
///
/// Mirror image of [`ByteReader`](super::ByteReader): every `write_*`
/// emits a fixed number of bytes regardless of value magnitude.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with `capacity` bytes preallocated. Descriptors
    /// know their exact size up front, so this avoids growth entirely.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Writes a single signed byte.
    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    /// Writes a u16 as two little-endian bytes.
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u32 as four little-endian bytes.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u64 as eight little-endian bytes.
    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes raw bytes verbatim, no endianness transformation.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes `n` zero bytes (reserved regions, signature placeholders,
    /// alignment padding).
    pub fn write_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    /// Consumes the writer, returning the accumulated bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Borrows the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}
