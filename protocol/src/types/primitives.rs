//! Fixed-width scalar newtypes.
//!
//! Every amount, identifier and duration on the wire is one of these.
//! They are `Copy`, immutable after construction, and know their exact
//! byte width; ordering follows the numeric value. Keeping them distinct
//! types (instead of bare `u64`s) makes "paid the token id as the amount"
//! a compile error instead of a mainnet incident.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};

macro_rules! wire_u64 {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
            Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            /// Byte width on the wire.
            pub const SIZE: usize = 8;

            /// The wrapped raw value.
            pub fn value(self) -> u64 {
                self.0
            }
        }

        impl Entity for $name {
            fn size(&self) -> usize {
                Self::SIZE
            }

            fn write(&self, w: &mut ByteWriter) {
                w.write_u64(self.0);
            }
        }

        impl Decode for $name {
            fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
                Ok(Self(r.read_u64()?))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

wire_u64! {
    /// A quantity of some token, in its smallest indivisible unit.
    /// Always an integer -- no floating point anywhere near money.
    Amount
}

wire_u64! {
    /// Identifier of a token definition on the network.
    TokenId
}

wire_u64! {
    /// Identifier of a registered namespace.
    NamespaceId
}

wire_u64! {
    /// A duration measured in blocks. Zero means "unlimited" where the
    /// declaring transaction allows it.
    BlockDuration
}

/// Nonce mixed into token id derivation; 4 bytes on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TokenNonce(pub u32);

impl TokenNonce {
    /// Byte width on the wire.
    pub const SIZE: usize = 4;
}

impl Entity for TokenNonce {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u32(self.0);
    }
}

impl Decode for TokenNonce {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_u32()?))
    }
}

/// A token id paired with a quantity; the element type of transfer token
/// lists. 16 bytes on the wire: id then amount, both little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenQuantity {
    /// Which token.
    pub id: TokenId,
    /// How much of it, in the token's smallest unit.
    pub amount: Amount,
}

impl TokenQuantity {
    /// Byte width on the wire.
    pub const SIZE: usize = TokenId::SIZE + Amount::SIZE;

    /// Convenience constructor.
    pub fn new(id: TokenId, amount: Amount) -> Self {
        Self { id, amount }
    }
}

impl Entity for TokenQuantity {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        self.id.write(w);
        self.amount.write(w);
    }
}

impl Decode for TokenQuantity {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            id: TokenId::read(r)?,
            amount: Amount::read(r)?,
        })
    }
}
