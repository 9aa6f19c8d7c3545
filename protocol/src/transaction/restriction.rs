//! Account address restriction body.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::codec::{
    collection_size, read_counted, write_collection, ByteReader, ByteWriter, CodecError, Decode,
    Entity,
};
use crate::types::Address;

bitflags! {
    /// What an account restriction matches on and how; two bytes on the
    /// wire. The low bits pick the restricted dimension, the high bits
    /// modify direction and polarity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AccountRestrictionFlags: u16 {
        /// Restriction keys on addresses.
        const ADDRESS = 0x0001;
        /// Restriction keys on token ids.
        const TOKEN = 0x0002;
        /// Restriction keys on transaction types.
        const TRANSACTION_TYPE = 0x0004;
        /// Applies to outgoing transactions instead of incoming.
        const OUTGOING = 0x4000;
        /// Blocks matches instead of allowing them.
        const BLOCK = 0x8000;
    }
}

impl Entity for AccountRestrictionFlags {
    fn size(&self) -> usize {
        2
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u16(self.bits());
    }
}

impl Decode for AccountRestrictionFlags {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let raw = r.read_u16()?;
        Self::from_bits(raw).ok_or(CodecError::UnknownVariant {
            field: "account_restriction_flags",
            value: raw as u64,
        })
    }
}

/// Adds and removes addresses from an account's restriction list.
///
/// Wire layout: `flags:u16 | additions_count:u8 | deletions_count:u8 |
/// reserved:u32 | additions(24 each) | deletions(24 each)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAddressRestrictionBody {
    /// What the restriction matches and how.
    pub flags: AccountRestrictionFlags,
    /// Addresses to add to the list.
    pub additions: Vec<Address>,
    /// Addresses to remove from the list.
    pub deletions: Vec<Address>,
}

impl Entity for AccountAddressRestrictionBody {
    fn size(&self) -> usize {
        2 + 1 + 1 + 4 + collection_size(&self.additions, 0) + collection_size(&self.deletions, 0)
    }

    fn check(&self) -> Result<(), CodecError> {
        if self.additions.len() > u8::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "additions_count",
                reason: "more additions than the u8 count field carries",
            });
        }
        if self.deletions.len() > u8::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "deletions_count",
                reason: "more deletions than the u8 count field carries",
            });
        }
        Ok(())
    }

    fn write(&self, w: &mut ByteWriter) {
        self.flags.write(w);
        w.write_u8(self.additions.len() as u8);
        w.write_u8(self.deletions.len() as u8);
        w.write_zeros(4);
        write_collection(w, &self.additions, 0);
        write_collection(w, &self.deletions, 0);
    }
}

impl Decode for AccountAddressRestrictionBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let flags = AccountRestrictionFlags::read(r)?;
        let additions_count = r.read_u8()? as usize;
        let deletions_count = r.read_u8()? as usize;
        r.read_reserved_u32("account_restriction_body_reserved")?;
        let additions = read_counted(r, additions_count, 0, Address::read)?;
        let deletions = read_counted(r, deletions_count, 0, Address::read)?;
        Ok(Self {
            flags,
            additions,
            deletions,
        })
    }
}
