//! # Canonical Binary Codec
//!
//! The generic serialization discipline shared by every wire entity in the
//! LUMEN protocol: fixed-width little-endian scalars, verbatim byte arrays,
//! composites that aggregate them in declaration order, counted collections,
//! and alignment padding for elements embedded in containers.
//!
//! The load-bearing contract lives in [`Entity`]: `size()` must equal the
//! number of bytes `write()` emits, for every reachable value. Everything
//! downstream -- collection codecs, aggregate byte budgets, the signing
//! pipeline's offset arithmetic -- precomputes sizes and then trusts them.
//! [`Entity::to_bytes`] verifies the invariant on every serialization and
//! refuses to hand out a buffer that violates it.
//!
//! Nothing here does I/O and nothing blocks. A [`ByteReader`] is owned by
//! one parse call; unrelated codec calls are trivially safe to run in
//! parallel because no state is shared.

mod collections;
mod error;
mod reader;
mod writer;

pub use collections::{collection_size, padding, read_byte_budget, read_counted, write_collection};
pub use error::CodecError;
pub use reader::ByteReader;
pub use writer::ByteWriter;

/// A self-sizing, self-serializing wire entity.
///
/// Implemented by every scalar newtype, header, and transaction body in the
/// crate. `write` is infallible by design; the one failure mode a descriptor
/// can have (lying about its size) is caught by [`Entity::to_bytes`].
pub trait Entity {
    /// Exact number of bytes [`Entity::write`] will emit for this value.
    fn size(&self) -> usize;

    /// Appends this value's canonical byte form to `w`.
    fn write(&self, w: &mut ByteWriter);

    /// Verifies every count and length field fits the wire width it is
    /// written at. Composite entities recurse into their children.
    ///
    /// `write` emits counts with truncating casts, so a value that fails
    /// this check would serialize to a self-inconsistent payload;
    /// [`Entity::to_bytes`] runs the check before writing anything.
    fn check(&self) -> Result<(), CodecError> {
        Ok(())
    }

    /// Serializes to a fresh buffer, enforcing the field-width and
    /// size/byte invariants.
    ///
    /// A [`CodecError::SizeMismatch`] here is a bug in the descriptor, not
    /// in the data; treat it as fatal.
    fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        self.check()?;
        let declared = self.size();
        let mut w = ByteWriter::with_capacity(declared);
        self.write(&mut w);
        if w.len() != declared {
            return Err(CodecError::SizeMismatch {
                declared,
                written: w.len(),
            });
        }
        Ok(w.into_bytes())
    }
}

/// A wire entity that can be parsed back from bytes.
///
/// Parsing proceeds strictly in declaration order, threading one reader
/// forward. Presence tests for conditional fields may only consult
/// already-parsed siblings, never look ahead.
pub trait Decode: Sized {
    /// Reads one value, consuming exactly its serialized bytes.
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError>;

    /// Parses from a standalone buffer. Trailing bytes are left to the
    /// caller to judge; size-prefixed entities check them themselves.
    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut r = ByteReader::new(bytes);
        Self::read(&mut r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Honest;
    struct Liar;

    impl Entity for Honest {
        fn size(&self) -> usize {
            3
        }
        fn write(&self, w: &mut ByteWriter) {
            w.write_bytes(&[1, 2, 3]);
        }
    }

    impl Entity for Liar {
        fn size(&self) -> usize {
            5
        }
        fn write(&self, w: &mut ByteWriter) {
            w.write_bytes(&[1, 2, 3]);
        }
    }

    #[test]
    fn to_bytes_accepts_consistent_entity() {
        assert_eq!(Honest.to_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn to_bytes_rejects_size_lie() {
        let err = Liar.to_bytes().unwrap_err();
        assert_eq!(
            err,
            CodecError::SizeMismatch {
                declared: 5,
                written: 3
            }
        );
    }

    struct Overflowing;

    impl Entity for Overflowing {
        fn size(&self) -> usize {
            0
        }
        fn write(&self, _w: &mut ByteWriter) {}
        fn check(&self) -> Result<(), CodecError> {
            Err(CodecError::InvalidFieldState {
                field: "count",
                reason: "count exceeds its wire width",
            })
        }
    }

    #[test]
    fn to_bytes_runs_check_before_writing() {
        let err = Overflowing.to_bytes().unwrap_err();
        assert!(matches!(err, CodecError::InvalidFieldState { .. }));
    }
}
