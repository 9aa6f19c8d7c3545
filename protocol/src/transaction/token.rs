//! Token definition and supply change bodies.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::types::{Amount, BlockDuration, TokenId, TokenNonce};

bitflags! {
    /// Properties baked into a token at definition time; one byte on the
    /// wire, bitwise OR of the set members. Unknown bits are a decode
    /// error, not silently dropped.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TokenFlags: u8 {
        /// The owner may change the supply after creation.
        const SUPPLY_MUTABLE = 0x01;
        /// Holders other than the owner may transfer the token.
        const TRANSFERABLE = 0x02;
        /// The owner may attach restriction rules to the token.
        const RESTRICTABLE = 0x04;
        /// The owner may revoke balances from holders.
        const REVOKABLE = 0x08;
    }
}

impl Entity for TokenFlags {
    fn size(&self) -> usize {
        1
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u8(self.bits());
    }
}

impl Decode for TokenFlags {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let raw = r.read_u8()?;
        Self::from_bits(raw).ok_or(CodecError::UnknownVariant {
            field: "token_flags",
            value: raw as u64,
        })
    }
}

/// Defines a new token.
///
/// Wire layout: `id:u64 | duration:u64 | nonce:u32 | flags:u8 |
/// divisibility:u8`, 22 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDefinitionBody {
    /// The token's identifier.
    pub id: TokenId,
    /// Lifetime in blocks; zero means the token never expires.
    pub duration: BlockDuration,
    /// Nonce mixed into the id derivation, letting one account define
    /// multiple tokens.
    pub nonce: TokenNonce,
    /// Immutable token properties.
    pub flags: TokenFlags,
    /// Number of decimal places the token subdivides into.
    pub divisibility: u8,
}

impl Entity for TokenDefinitionBody {
    fn size(&self) -> usize {
        TokenId::SIZE + BlockDuration::SIZE + TokenNonce::SIZE + 1 + 1
    }

    fn write(&self, w: &mut ByteWriter) {
        self.id.write(w);
        self.duration.write(w);
        self.nonce.write(w);
        self.flags.write(w);
        w.write_u8(self.divisibility);
    }
}

impl Decode for TokenDefinitionBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            id: TokenId::read(r)?,
            duration: BlockDuration::read(r)?,
            nonce: TokenNonce::read(r)?,
            flags: TokenFlags::read(r)?,
            divisibility: r.read_u8()?,
        })
    }
}

/// Direction of a supply change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplyAction {
    /// Burn supply.
    Decrease,
    /// Mint supply.
    Increase,
}

impl Entity for SupplyAction {
    fn size(&self) -> usize {
        1
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u8(match self {
            SupplyAction::Decrease => 0,
            SupplyAction::Increase => 1,
        });
    }
}

impl Decode for SupplyAction {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match r.read_u8()? {
            0 => Ok(SupplyAction::Decrease),
            1 => Ok(SupplyAction::Increase),
            other => Err(CodecError::UnknownVariant {
                field: "supply_action",
                value: other as u64,
            }),
        }
    }
}

/// Mints or burns supply of an existing token.
///
/// Wire layout: `token_id:u64 | delta:u64 | action:u8`, 17 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSupplyChangeBody {
    /// The token whose supply changes.
    pub token_id: TokenId,
    /// Magnitude of the change, in the token's smallest unit.
    pub delta: Amount,
    /// Mint or burn.
    pub action: SupplyAction,
}

impl Entity for TokenSupplyChangeBody {
    fn size(&self) -> usize {
        TokenId::SIZE + Amount::SIZE + 1
    }

    fn write(&self, w: &mut ByteWriter) {
        self.token_id.write(w);
        self.delta.write(w);
        self.action.write(w);
    }
}

impl Decode for TokenSupplyChangeBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            token_id: TokenId::read(r)?,
            delta: Amount::read(r)?,
            action: SupplyAction::read(r)?,
        })
    }
}
