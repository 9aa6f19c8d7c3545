//! Transaction type discriminants.
//!
//! The (type, version) pair in a header selects the body codec during
//! dispatch. The type is deliberately a thin newtype over the raw u16
//! rather than a closed enum: unknown codes must survive a parse round
//! trip verbatim (graceful degradation to a raw body), so the type must
//! be able to carry values this crate has never heard of.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};

/// A transaction type code; 2 bytes little-endian on the wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionType(pub u16);

impl TransactionType {
    /// Byte width on the wire.
    pub const SIZE: usize = 2;

    /// Moves tokens and an optional message to a recipient address.
    pub const TRANSFER: Self = Self(0x0154);
    /// Aggregate whose cosignatures are all attached at submission.
    pub const AGGREGATE_COMPLETE: Self = Self(0x0141);
    /// Aggregate whose cosignatures are collected asynchronously.
    pub const AGGREGATE_BONDED: Self = Self(0x0241);
    /// Defines a new token.
    pub const TOKEN_DEFINITION: Self = Self(0x014D);
    /// Increases or decreases a token's supply.
    pub const TOKEN_SUPPLY_CHANGE: Self = Self(0x024D);
    /// Registers a root or child namespace.
    pub const NAMESPACE_REGISTRATION: Self = Self(0x014E);
    /// Adjusts a multisig account's cosignatory set and thresholds.
    pub const MULTISIG_MODIFICATION: Self = Self(0x0155);
    /// Restricts which addresses may interact with an account.
    pub const ACCOUNT_ADDRESS_RESTRICTION: Self = Self(0x0150);
    /// Links or unlinks a remote public key to an account.
    pub const ACCOUNT_KEY_LINK: Self = Self(0x014C);
    /// Locks funds against a bonded aggregate's hash.
    pub const HASH_LOCK: Self = Self(0x0148);

    /// The raw code.
    pub fn code(self) -> u16 {
        self.0
    }

    /// `true` for either aggregate flavor.
    pub fn is_aggregate(self) -> bool {
        self == Self::AGGREGATE_COMPLETE || self == Self::AGGREGATE_BONDED
    }

    /// Human-readable name; `"unknown"` for codes outside the table.
    pub fn name(self) -> &'static str {
        match self {
            Self::TRANSFER => "transfer",
            Self::AGGREGATE_COMPLETE => "aggregate_complete",
            Self::AGGREGATE_BONDED => "aggregate_bonded",
            Self::TOKEN_DEFINITION => "token_definition",
            Self::TOKEN_SUPPLY_CHANGE => "token_supply_change",
            Self::NAMESPACE_REGISTRATION => "namespace_registration",
            Self::MULTISIG_MODIFICATION => "multisig_modification",
            Self::ACCOUNT_ADDRESS_RESTRICTION => "account_address_restriction",
            Self::ACCOUNT_KEY_LINK => "account_key_link",
            Self::HASH_LOCK => "hash_lock",
            _ => "unknown",
        }
    }
}

impl Entity for TransactionType {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u16(self.0);
    }
}

impl Decode for TransactionType {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_u16()?))
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionType({:#06x}, {})", self.0, self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            TransactionType::TRANSFER,
            TransactionType::AGGREGATE_COMPLETE,
            TransactionType::AGGREGATE_BONDED,
            TransactionType::TOKEN_DEFINITION,
            TransactionType::TOKEN_SUPPLY_CHANGE,
            TransactionType::NAMESPACE_REGISTRATION,
            TransactionType::MULTISIG_MODIFICATION,
            TransactionType::ACCOUNT_ADDRESS_RESTRICTION,
            TransactionType::ACCOUNT_KEY_LINK,
            TransactionType::HASH_LOCK,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn wire_form_is_le_u16() {
        let bytes = TransactionType::TRANSFER.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x54, 0x01]);
        assert_eq!(
            <TransactionType as Decode>::from_bytes(&bytes).unwrap(),
            TransactionType::TRANSFER
        );
    }

    #[test]
    fn unknown_code_survives_roundtrip() {
        let unknown = TransactionType(0xBEEF);
        let bytes = unknown.to_bytes().unwrap();
        let back = <TransactionType as Decode>::from_bytes(&bytes).unwrap();
        assert_eq!(back, unknown);
        assert_eq!(back.name(), "unknown");
    }

    #[test]
    fn aggregate_detection() {
        assert!(TransactionType::AGGREGATE_COMPLETE.is_aggregate());
        assert!(TransactionType::AGGREGATE_BONDED.is_aggregate());
        assert!(!TransactionType::TRANSFER.is_aggregate());
        assert!(!TransactionType::HASH_LOCK.is_aggregate());
    }
}
