//! Multisig account modification body.

use serde::{Deserialize, Serialize};

use crate::codec::{
    collection_size, read_counted, write_collection, ByteReader, ByteWriter, CodecError, Decode,
    Entity,
};
use crate::types::Address;

/// Adjusts a multisig account's cosignatory set and approval thresholds.
///
/// Wire layout: `min_removal_delta:i8 | min_approval_delta:i8 |
/// additions_count:u8 | deletions_count:u8 | reserved:u32 |
/// additions(24 each) | deletions(24 each)`.
///
/// The deltas are signed adjustments relative to the account's current
/// thresholds; whether the resulting thresholds are sane is network
/// policy, not a codec concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigModificationBody {
    /// Change to the number of signatures required to remove a cosignatory.
    pub min_removal_delta: i8,
    /// Change to the number of signatures required to approve a transaction.
    pub min_approval_delta: i8,
    /// Cosignatory addresses to add.
    pub additions: Vec<Address>,
    /// Cosignatory addresses to remove.
    pub deletions: Vec<Address>,
}

impl Entity for MultisigModificationBody {
    fn size(&self) -> usize {
        1 + 1 + 1 + 1 + 4 + collection_size(&self.additions, 0) + collection_size(&self.deletions, 0)
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
        w.write_i8(self.min_removal_delta);
        w.write_i8(self.min_approval_delta);
        w.write_u8(self.additions.len() as u8);
        w.write_u8(self.deletions.len() as u8);
        w.write_zeros(4);
        write_collection(w, &self.additions, 0);
        write_collection(w, &self.deletions, 0);
    }
}

impl Decode for MultisigModificationBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let min_removal_delta = r.read_i8()?;
        let min_approval_delta = r.read_i8()?;
        let additions_count = r.read_u8()? as usize;
        let deletions_count = r.read_u8()? as usize;
        r.read_reserved_u32("multisig_body_reserved")?;
        let additions = read_counted(r, additions_count, 0, Address::read)?;
        let deletions = read_counted(r, deletions_count, 0, Address::read)?;
        Ok(Self {
            min_removal_delta,
            min_approval_delta,
            additions,
            deletions,
        })
    }
}
