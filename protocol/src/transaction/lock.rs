//! Hash lock body.

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::types::{BlockDuration, Hash256, TokenQuantity};

/// Locks funds against the hash of a bonded aggregate.
///
/// A bonded aggregate is only accepted by the network after a hash lock
/// naming its transaction hash has confirmed; the locked funds are
/// returned when the aggregate completes and forfeited if it expires.
///
/// Wire layout: `token(16) | duration:u64 | hash:32`, 56 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashLockBody {
    /// The locked token quantity.
    pub token: TokenQuantity,
    /// How long the lock lives, in blocks.
    pub duration: BlockDuration,
    /// Transaction hash of the bonded aggregate being vouched for.
    pub hash: Hash256,
}

impl Entity for HashLockBody {
    fn size(&self) -> usize {
        TokenQuantity::SIZE + BlockDuration::SIZE + Hash256::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        self.token.write(w);
        self.duration.write(w);
        self.hash.write(w);
    }
}

impl Decode for HashLockBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            token: TokenQuantity::read(r)?,
            duration: BlockDuration::read(r)?,
            hash: Hash256::read(r)?,
        })
    }
}
