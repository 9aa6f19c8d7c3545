//! Account key link body.

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::crypto::LumenPublicKey;

/// Whether a key link is being created or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAction {
    /// Remove an existing link.
    Unlink,
    /// Create the link.
    Link,
}

impl Entity for LinkAction {
    fn size(&self) -> usize {
        1
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u8(match self {
            LinkAction::Unlink => 0,
            LinkAction::Link => 1,
        });
    }
}

impl Decode for LinkAction {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match r.read_u8()? {
            0 => Ok(LinkAction::Unlink),
            1 => Ok(LinkAction::Link),
            other => Err(CodecError::UnknownVariant {
                field: "link_action",
                value: other as u64,
            }),
        }
    }
}

/// Links a remote public key to the signing account, or removes the link.
///
/// Wire layout: `linked_public_key:32 | link_action:u8`, 33 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKeyLinkBody {
    /// The key being linked or unlinked.
    pub linked_public_key: LumenPublicKey,
    /// Link or unlink.
    pub action: LinkAction,
}

impl Entity for AccountKeyLinkBody {
    fn size(&self) -> usize {
        LumenPublicKey::SIZE + 1
    }

    fn write(&self, w: &mut ByteWriter) {
        self.linked_public_key.write(w);
        self.action.write(w);
    }
}

impl Decode for AccountKeyLinkBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            linked_public_key: LumenPublicKey::read(r)?,
            action: LinkAction::read(r)?,
        })
    }
}
