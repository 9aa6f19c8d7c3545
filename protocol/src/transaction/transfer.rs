//! Transfer transaction body.

use serde::{Deserialize, Serialize};

use crate::codec::{
    collection_size, read_counted, write_collection, ByteReader, ByteWriter, CodecError, Decode,
    Entity,
};
use crate::types::{Address, TokenQuantity};

/// Moves tokens and an optional message to a recipient.
///
/// Wire layout: `recipient(24) | message_size:u16 | token_count:u8 |
/// reserved:u32 | reserved:u8 | tokens(16 each) | message bytes`. Tokens
/// are sorted ascending by id at construction; the network rejects
/// unsorted lists, so [`TransferBody::new`] does the sorting rather than
/// trusting callers to remember.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferBody {
    /// Destination address.
    pub recipient: Address,
    /// Token quantities to move, ascending by token id.
    pub tokens: Vec<TokenQuantity>,
    /// Free-form message bytes; UTF-8 for human-readable memos.
    pub message: Vec<u8>,
}

impl TransferBody {
    /// Builds a transfer body, sorting `tokens` by id.
    pub fn new(recipient: Address, mut tokens: Vec<TokenQuantity>, message: Vec<u8>) -> Self {
        tokens.sort_by_key(|t| t.id);
        Self {
            recipient,
            tokens,
            message,
        }
    }
}

impl Entity for TransferBody {
    fn size(&self) -> usize {
        Address::SIZE + 2 + 1 + 4 + 1 + collection_size(&self.tokens, 0) + self.message.len()
    }

    fn check(&self) -> Result<(), CodecError> {
        if self.message.len() > u16::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "message_size",
                reason: "message longer than the u16 size field carries",
            });
        }
        if self.tokens.len() > u8::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "token_count",
                reason: "more tokens than the u8 count field carries",
            });
        }
        Ok(())
    }

    fn write(&self, w: &mut ByteWriter) {
        self.recipient.write(w);
        w.write_u16(self.message.len() as u16);
        w.write_u8(self.tokens.len() as u8);
        w.write_zeros(5);
        write_collection(w, &self.tokens, 0);
        w.write_bytes(&self.message);
    }
}

impl Decode for TransferBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let recipient = Address::read(r)?;
        let message_size = r.read_u16()? as usize;
        let token_count = r.read_u8()? as usize;
        r.read_reserved_u32("transfer_body_reserved")?;
        r.read_reserved_u8("transfer_body_reserved")?;
        let tokens = read_counted(r, token_count, 0, TokenQuantity::read)?;
        let message = r.read_bytes(message_size)?.to_vec();
        Ok(Self {
            recipient,
            tokens,
            message,
        })
    }
}
