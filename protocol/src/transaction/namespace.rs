//! Namespace registration body.

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::types::{BlockDuration, NamespaceId};

/// Where a namespace hangs in the tree.
///
/// The wire carries one u64 whose meaning depends on the registration
/// kind byte that follows it: a duration for roots, a parent id for
/// children. Binding the field to the kind at the type level makes
/// "read the duration of a child namespace" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceScope {
    /// A top-level namespace, rented for a number of blocks.
    Root {
        /// Rental duration in blocks.
        duration: BlockDuration,
    },
    /// A namespace nested under an existing one.
    Child {
        /// The enclosing namespace.
        parent_id: NamespaceId,
    },
}

/// Registers a root or child namespace.
///
/// Wire layout: `duration-or-parent:u64 | id:u64 | kind:u8 |
/// name_size:u8 | name bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRegistrationBody {
    /// Root-with-duration or child-with-parent.
    pub scope: NamespaceScope,
    /// The namespace's own identifier.
    pub id: NamespaceId,
    /// Namespace name bytes; at most 255 by the width of the size field.
    pub name: Vec<u8>,
}

impl Entity for NamespaceRegistrationBody {
    fn size(&self) -> usize {
        8 + NamespaceId::SIZE + 1 + 1 + self.name.len()
    }

    fn check(&self) -> Result<(), CodecError> {
        if self.name.len() > u8::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "name_size",
                reason: "name longer than the u8 size field carries",
            });
        }
        Ok(())
    }

    fn write(&self, w: &mut ByteWriter) {
        match self.scope {
            NamespaceScope::Root { duration } => {
                duration.write(w);
            }
            NamespaceScope::Child { parent_id } => {
                parent_id.write(w);
            }
        }
        self.id.write(w);
        w.write_u8(match self.scope {
            NamespaceScope::Root { .. } => 0,
            NamespaceScope::Child { .. } => 1,
        });
        w.write_u8(self.name.len() as u8);
        w.write_bytes(&self.name);
    }
}

impl Decode for NamespaceRegistrationBody {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        // The u64 is read before the kind byte that interprets it; hold it
        // raw until the discriminant arrives (no look-ahead).
        let scope_value = r.read_u64()?;
        let id = NamespaceId::read(r)?;
        let scope = match r.read_u8()? {
            0 => NamespaceScope::Root {
                duration: BlockDuration(scope_value),
            },
            1 => NamespaceScope::Child {
                parent_id: NamespaceId(scope_value),
            },
            other => {
                return Err(CodecError::UnknownVariant {
                    field: "namespace_registration_kind",
                    value: other as u64,
                })
            }
        };
        let name_size = r.read_u8()? as usize;
        let name = r.read_bytes(name_size)?.to_vec();
        Ok(Self { scope, id, name })
    }
}
