//! Error taxonomy for the wire codec.
//!
//! Every decode or serialize failure in the codec maps to exactly one of
//! these variants. They are raised at the point of detection and propagate
//! uncaught -- malformed binary state cannot be repaired locally, so there
//! is no retry machinery anywhere in this crate. Callers (the network layer,
//! which lives outside this crate) decide what to tell the user.

use thiserror::Error;

/// Errors produced while reading or writing wire-format bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input ended before a fixed-width read could complete.
    #[error("truncated input: needed {needed} bytes, only {remaining} remain")]
    Truncated {
        /// Bytes the read required.
        needed: usize,
        /// Bytes actually left in the stream.
        remaining: usize,
    },

    /// A discriminant or flag value is not part of the known enumeration.
    ///
    /// This is distinct from an unmapped (type, version) pair during
    /// dispatch, which degrades to a raw body instead of erroring.
    #[error("unknown {field} value: {value:#x}")]
    UnknownVariant {
        /// The field whose raw value was unrecognized.
        field: &'static str,
        /// The offending raw value, widened to u64.
        value: u64,
    },

    /// An entity's declared size does not match the bytes it serialized.
    ///
    /// This is a programming error in a descriptor, not a data error.
    /// Treat it as fatal; do not retry.
    #[error("size mismatch: declared {declared} bytes, wrote {written}")]
    SizeMismatch {
        /// What `size()` reported.
        declared: usize,
        /// What `write()` actually emitted.
        written: usize,
    },

    /// A field required by a sibling flag or discriminant is missing or
    /// inconsistent with it.
    #[error("invalid field state for {field}: {reason}")]
    InvalidFieldState {
        /// The field that failed the presence/consistency rule.
        field: &'static str,
        /// What the governing sibling demanded.
        reason: &'static str,
    },

    /// A reserved region that must be zero-filled was not.
    #[error("reserved field {field} must be zero, found {value:#x}")]
    NonZeroReserved {
        /// The reserved field name.
        field: &'static str,
        /// The non-zero value found on the wire.
        value: u64,
    },
}
