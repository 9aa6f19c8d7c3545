//! # Protocol Constants
//!
//! Every magic number of the wire layout lives here. If you are hardcoding
//! a byte offset somewhere else, you are doing it wrong.
//!
//! These values define the byte layout the network accepts. They are fixed
//! by consensus; changing any of them produces payloads no node will take.

// ---------------------------------------------------------------------------
// Header layout
// ---------------------------------------------------------------------------

/// Serialized size of a top-level transaction header:
/// `size(4) | reserved(4) | signature(64) | signer(32) | reserved(4) |
/// version(1) | network(1) | type(2) | max_fee(8) | deadline(8)`.
pub const TRANSACTION_HEADER_SIZE: usize = 128;

/// Serialized size of an embedded transaction header:
/// `size(4) | reserved(4) | signer(32) | reserved(4) | version(1) |
/// network(1) | type(2)`. Signature, fee and deadline are hoisted to the
/// enclosing aggregate.
pub const EMBEDDED_HEADER_SIZE: usize = 48;

/// Offset of the signature field inside a serialized transaction.
pub const SIGNATURE_OFFSET: usize = 8;

/// Offset of the signer public key inside a serialized transaction.
pub const SIGNER_OFFSET: usize = 72;

/// Length of the prefix excluded from signing: everything through the
/// reserved word that follows the signer key. Signing bytes start here.
pub const SIGNING_PREFIX_SIZE: usize = 108;

// ---------------------------------------------------------------------------
// Protocol version
// ---------------------------------------------------------------------------

/// Transaction format version carried in every header. Bumped only on
/// layout changes; the dispatch tables key on (type, version).
pub const TRANSACTION_VERSION: u8 = 1;

/// Version word carried by every cosignature record.
pub const COSIGNATURE_VERSION: u64 = 0;

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Alignment boundary for embedded transactions inside an aggregate body.
pub const EMBEDDED_ALIGNMENT: usize = 8;

/// Serialized size of one cosignature record:
/// `version(8) | signer(32) | signature(64)`.
pub const COSIGNATURE_SIZE: usize = 104;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout_adds_up() {
        assert_eq!(4 + 4 + 64 + 32 + 4 + 1 + 1 + 2 + 8 + 8, TRANSACTION_HEADER_SIZE);
        assert_eq!(4 + 4 + 32 + 4 + 1 + 1 + 2, EMBEDDED_HEADER_SIZE);
        assert_eq!(SIGNER_OFFSET, SIGNATURE_OFFSET + 64);
        assert_eq!(SIGNING_PREFIX_SIZE, SIGNER_OFFSET + 32 + 4);
    }

    #[test]
    fn cosignature_layout_adds_up() {
        assert_eq!(8 + 32 + 64, COSIGNATURE_SIZE);
    }
}
