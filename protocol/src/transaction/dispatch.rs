//! Polymorphic transaction parsing.
//!
//! A serialized transaction identifies its body with the (type, version)
//! pair in its header. Two lookup tables map that discriminant to a body
//! parser: one for top-level transactions, one for embedded transactions
//! (aggregates cannot nest, so the embedded table has no aggregate
//! entries). Both are built once and queried in constant time.
//!
//! An unmapped discriminant is not an error. The body is kept as opaque
//! bytes ([`TransactionBody::Raw`]) so a payload from a newer network
//! survives a parse round trip verbatim; callers that need a typed body
//! check the variant. Unknown *values* inside a known body (a bad flag
//! bit, an out-of-range enum byte) do error, because there the layout is
//! known and the bytes are wrong.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::config::TRANSACTION_VERSION;
use crate::transaction::aggregate::AggregateBody;
use crate::transaction::entity_type::TransactionType;
use crate::transaction::header::{EmbeddedHeader, TransactionHeader};
use crate::transaction::key_link::AccountKeyLinkBody;
use crate::transaction::lock::HashLockBody;
use crate::transaction::multisig::MultisigModificationBody;
use crate::transaction::namespace::NamespaceRegistrationBody;
use crate::transaction::restriction::AccountAddressRestrictionBody;
use crate::transaction::token::{TokenDefinitionBody, TokenSupplyChangeBody};
use crate::transaction::transfer::TransferBody;

/// A parsed transaction body, one variant per body family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionBody {
    /// Token transfer with optional message.
    Transfer(TransferBody),
    /// New token definition.
    TokenDefinition(TokenDefinitionBody),
    /// Token supply mint or burn.
    TokenSupplyChange(TokenSupplyChangeBody),
    /// Root or child namespace registration.
    NamespaceRegistration(NamespaceRegistrationBody),
    /// Multisig cosignatory and threshold changes.
    MultisigModification(MultisigModificationBody),
    /// Account address restriction changes.
    AccountAddressRestriction(AccountAddressRestrictionBody),
    /// Remote key link or unlink.
    AccountKeyLink(AccountKeyLinkBody),
    /// Funds locked against a bonded aggregate.
    HashLock(HashLockBody),
    /// Embedded transactions plus cosignatures.
    Aggregate(AggregateBody),
    /// Body bytes of a discriminant this crate has no codec for.
    Raw(Vec<u8>),
}

impl TransactionBody {
    /// The type code this body serializes under, when it determines one.
    ///
    /// `None` for [`TransactionBody::Raw`] (the code lives only in the
    /// header) and for [`TransactionBody::Aggregate`] (complete and
    /// bonded share a body shape; the header decides which).
    pub fn transaction_type(&self) -> Option<TransactionType> {
        match self {
            TransactionBody::Transfer(_) => Some(TransactionType::TRANSFER),
            TransactionBody::TokenDefinition(_) => Some(TransactionType::TOKEN_DEFINITION),
            TransactionBody::TokenSupplyChange(_) => Some(TransactionType::TOKEN_SUPPLY_CHANGE),
            TransactionBody::NamespaceRegistration(_) => {
                Some(TransactionType::NAMESPACE_REGISTRATION)
            }
            TransactionBody::MultisigModification(_) => {
                Some(TransactionType::MULTISIG_MODIFICATION)
            }
            TransactionBody::AccountAddressRestriction(_) => {
                Some(TransactionType::ACCOUNT_ADDRESS_RESTRICTION)
            }
            TransactionBody::AccountKeyLink(_) => Some(TransactionType::ACCOUNT_KEY_LINK),
            TransactionBody::HashLock(_) => Some(TransactionType::HASH_LOCK),
            TransactionBody::Aggregate(_) | TransactionBody::Raw(_) => None,
        }
    }
}

impl Entity for TransactionBody {
    fn size(&self) -> usize {
        match self {
            TransactionBody::Transfer(b) => b.size(),
            TransactionBody::TokenDefinition(b) => b.size(),
            TransactionBody::TokenSupplyChange(b) => b.size(),
            TransactionBody::NamespaceRegistration(b) => b.size(),
            TransactionBody::MultisigModification(b) => b.size(),
            TransactionBody::AccountAddressRestriction(b) => b.size(),
            TransactionBody::AccountKeyLink(b) => b.size(),
            TransactionBody::HashLock(b) => b.size(),
            TransactionBody::Aggregate(b) => b.size(),
            TransactionBody::Raw(bytes) => bytes.len(),
        }
    }

    fn check(&self) -> Result<(), CodecError> {
        match self {
            TransactionBody::Transfer(b) => b.check(),
            TransactionBody::TokenDefinition(b) => b.check(),
            TransactionBody::TokenSupplyChange(b) => b.check(),
            TransactionBody::NamespaceRegistration(b) => b.check(),
            TransactionBody::MultisigModification(b) => b.check(),
            TransactionBody::AccountAddressRestriction(b) => b.check(),
            TransactionBody::AccountKeyLink(b) => b.check(),
            TransactionBody::HashLock(b) => b.check(),
            TransactionBody::Aggregate(b) => b.check(),
            TransactionBody::Raw(_) => Ok(()),
        }
    }

    fn write(&self, w: &mut ByteWriter) {
        match self {
            TransactionBody::Transfer(b) => b.write(w),
            TransactionBody::TokenDefinition(b) => b.write(w),
            TransactionBody::TokenSupplyChange(b) => b.write(w),
            TransactionBody::NamespaceRegistration(b) => b.write(w),
            TransactionBody::MultisigModification(b) => b.write(w),
            TransactionBody::AccountAddressRestriction(b) => b.write(w),
            TransactionBody::AccountKeyLink(b) => b.write(w),
            TransactionBody::HashLock(b) => b.write(w),
            TransactionBody::Aggregate(b) => b.write(w),
            TransactionBody::Raw(bytes) => w.write_bytes(bytes),
        }
    }
}

type BodyParser = fn(&mut ByteReader<'_>) -> Result<TransactionBody, CodecError>;

fn top_level_table() -> &'static HashMap<(u16, u8), BodyParser> {
    static TABLE: OnceLock<HashMap<(u16, u8), BodyParser>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t: HashMap<(u16, u8), BodyParser> = HashMap::new();
        let v = TRANSACTION_VERSION;
        t.insert((TransactionType::TRANSFER.code(), v), |r| {
            Ok(TransactionBody::Transfer(TransferBody::read(r)?))
        });
        t.insert((TransactionType::TOKEN_DEFINITION.code(), v), |r| {
            Ok(TransactionBody::TokenDefinition(TokenDefinitionBody::read(
                r,
            )?))
        });
        t.insert((TransactionType::TOKEN_SUPPLY_CHANGE.code(), v), |r| {
            Ok(TransactionBody::TokenSupplyChange(
                TokenSupplyChangeBody::read(r)?,
            ))
        });
        t.insert((TransactionType::NAMESPACE_REGISTRATION.code(), v), |r| {
            Ok(TransactionBody::NamespaceRegistration(
                NamespaceRegistrationBody::read(r)?,
            ))
        });
        t.insert((TransactionType::MULTISIG_MODIFICATION.code(), v), |r| {
            Ok(TransactionBody::MultisigModification(
                MultisigModificationBody::read(r)?,
            ))
        });
        t.insert(
            (TransactionType::ACCOUNT_ADDRESS_RESTRICTION.code(), v),
            |r| {
                Ok(TransactionBody::AccountAddressRestriction(
                    AccountAddressRestrictionBody::read(r)?,
                ))
            },
        );
        t.insert((TransactionType::ACCOUNT_KEY_LINK.code(), v), |r| {
            Ok(TransactionBody::AccountKeyLink(AccountKeyLinkBody::read(
                r,
            )?))
        });
        t.insert((TransactionType::HASH_LOCK.code(), v), |r| {
            Ok(TransactionBody::HashLock(HashLockBody::read(r)?))
        });
        t.insert((TransactionType::AGGREGATE_COMPLETE.code(), v), |r| {
            Ok(TransactionBody::Aggregate(AggregateBody::read(r)?))
        });
        t.insert((TransactionType::AGGREGATE_BONDED.code(), v), |r| {
            Ok(TransactionBody::Aggregate(AggregateBody::read(r)?))
        });
        t
    })
}

fn embedded_table() -> &'static HashMap<(u16, u8), BodyParser> {
    static TABLE: OnceLock<HashMap<(u16, u8), BodyParser>> = OnceLock::new();
    TABLE.get_or_init(|| {
        // Aggregates cannot nest; everything else embeds unchanged.
        let mut t = top_level_table().clone();
        t.remove(&(TransactionType::AGGREGATE_COMPLETE.code(), TRANSACTION_VERSION));
        t.remove(&(TransactionType::AGGREGATE_BONDED.code(), TRANSACTION_VERSION));
        t
    })
}

/// Parses one body region against a dispatch table.
///
/// The region is already sliced to the declared length; a known body must
/// consume it exactly, an unknown discriminant keeps it raw.
fn parse_body(
    table: &HashMap<(u16, u8), BodyParser>,
    tx_type: TransactionType,
    version: u8,
    body_bytes: &[u8],
) -> Result<TransactionBody, CodecError> {
    match table.get(&(tx_type.code(), version)) {
        Some(parser) => {
            let mut r = ByteReader::new(body_bytes);
            let body = parser(&mut r)?;
            if !r.at_end() {
                return Err(CodecError::InvalidFieldState {
                    field: "size",
                    reason: "declared size exceeds the bytes the body consumed",
                });
            }
            Ok(body)
        }
        None => {
            debug!(
                tx_type = tx_type.code(),
                version, "no body codec for discriminant, keeping body raw"
            );
            Ok(TransactionBody::Raw(body_bytes.to_vec()))
        }
    }
}

/// A top-level transaction: 128-byte header plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The header.
    pub header: TransactionHeader,
    /// The body matching `header.tx_type`, or raw bytes if unmapped.
    pub body: TransactionBody,
}

impl Entity for Transaction {
    fn size(&self) -> usize {
        TransactionHeader::SIZE + self.body.size()
    }

    fn check(&self) -> Result<(), CodecError> {
        if self.size() > u32::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "size",
                reason: "transaction larger than the u32 size field carries",
            });
        }
        self.body.check()
    }

    fn write(&self, w: &mut ByteWriter) {
        self.header.write_with_size(w, self.size() as u32);
        self.body.write(w);
    }
}

impl Decode for Transaction {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let (declared, header) = TransactionHeader::read(r)?;
        let declared = declared as usize;
        if declared < TransactionHeader::SIZE {
            return Err(CodecError::InvalidFieldState {
                field: "size",
                reason: "declared size is smaller than the header",
            });
        }
        let body_bytes = r.read_bytes(declared - TransactionHeader::SIZE)?;
        let body = parse_body(top_level_table(), header.tx_type, header.version, body_bytes)?;
        Ok(Self { header, body })
    }
}

/// A transaction embedded in an aggregate: 48-byte header plus body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedTransaction {
    /// The reduced header.
    pub header: EmbeddedHeader,
    /// The body matching `header.tx_type`, or raw bytes if unmapped.
    pub body: TransactionBody,
}

impl Entity for EmbeddedTransaction {
    fn size(&self) -> usize {
        EmbeddedHeader::SIZE + self.body.size()
    }

    fn check(&self) -> Result<(), CodecError> {
        if self.size() > u32::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "size",
                reason: "transaction larger than the u32 size field carries",
            });
        }
        self.body.check()
    }

    fn write(&self, w: &mut ByteWriter) {
        self.header.write_with_size(w, self.size() as u32);
        self.body.write(w);
    }
}

impl Decode for EmbeddedTransaction {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let (declared, header) = EmbeddedHeader::read(r)?;
        let declared = declared as usize;
        if declared < EmbeddedHeader::SIZE {
            return Err(CodecError::InvalidFieldState {
                field: "size",
                reason: "declared size is smaller than the header",
            });
        }
        let body_bytes = r.read_bytes(declared - EmbeddedHeader::SIZE)?;
        let body = parse_body(embedded_table(), header.tx_type, header.version, body_bytes)?;
        Ok(Self { header, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{LumenKeypair, LumenSignature};
    use crate::types::{Address, Amount, Deadline, NetworkType, TokenId, TokenQuantity};

    fn recipient() -> Address {
        Address::from_public_key(
            &LumenKeypair::from_seed(&[0x42; 32]).public_key(),
            NetworkType::Testnet,
        )
    }

    fn transfer_tx() -> Transaction {
        Transaction {
            header: TransactionHeader {
                signature: LumenSignature::zero(),
                signer: LumenKeypair::from_seed(&[1; 32]).public_key(),
                version: TRANSACTION_VERSION,
                network: NetworkType::Testnet,
                tx_type: TransactionType::TRANSFER,
                max_fee: Amount(2_000_000),
                deadline: Deadline(8_217_600_000),
            },
            body: TransactionBody::Transfer(TransferBody::new(
                recipient(),
                vec![TokenQuantity::new(TokenId(7), Amount(55))],
                b"hi".to_vec(),
            )),
        }
    }

    #[test]
    fn transaction_roundtrip_is_byte_exact() {
        let tx = transfer_tx();
        let bytes = tx.to_bytes().unwrap();
        let back = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(back, tx);
        assert_eq!(back.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn unknown_type_degrades_to_raw() {
        let mut tx = transfer_tx();
        tx.header.tx_type = TransactionType(0x0999);
        let bytes = tx.to_bytes().unwrap();

        let back = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(back.header.tx_type, TransactionType(0x0999));
        match &back.body {
            TransactionBody::Raw(raw) => {
                assert_eq!(raw.len(), tx.body.size());
            }
            other => panic!("expected raw body, got {other:?}"),
        }
        // And the raw form survives re-serialization verbatim.
        assert_eq!(back.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn unknown_version_degrades_to_raw() {
        let mut tx = transfer_tx();
        tx.header.version = 9;
        let bytes = tx.to_bytes().unwrap();
        let back = Transaction::from_bytes(&bytes).unwrap();
        assert!(matches!(back.body, TransactionBody::Raw(_)));
    }

    #[test]
    fn declared_size_must_match_body_exactly() {
        let tx = transfer_tx();
        let mut bytes = tx.to_bytes().unwrap();
        // Inflate the size word by one and append a stray byte.
        let inflated = (bytes.len() + 1) as u32;
        bytes[0..4].copy_from_slice(&inflated.to_le_bytes());
        bytes.push(0);

        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFieldState { .. }));
    }

    #[test]
    fn size_smaller_than_header_rejected() {
        let tx = transfer_tx();
        let mut bytes = tx.to_bytes().unwrap();
        bytes[0..4].copy_from_slice(&64u32.to_le_bytes());
        let err = Transaction::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::InvalidFieldState { .. }));
    }

    #[test]
    fn truncated_payload_rejected() {
        let tx = transfer_tx();
        let bytes = tx.to_bytes().unwrap();
        let err = Transaction::from_bytes(&bytes[..bytes.len() - 4]).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }

    #[test]
    fn embedded_transaction_roundtrip() {
        let embedded = EmbeddedTransaction {
            header: EmbeddedHeader {
                signer: LumenKeypair::from_seed(&[2; 32]).public_key(),
                version: TRANSACTION_VERSION,
                network: NetworkType::Testnet,
                tx_type: TransactionType::TRANSFER,
            },
            body: TransactionBody::Transfer(TransferBody::new(recipient(), vec![], vec![])),
        };
        let bytes = embedded.to_bytes().unwrap();
        assert_eq!(EmbeddedTransaction::from_bytes(&bytes).unwrap(), embedded);
    }

    #[test]
    fn aggregates_do_not_nest() {
        // An embedded entity carrying an aggregate type code parses, but
        // only as a raw body.
        let embedded = EmbeddedTransaction {
            header: EmbeddedHeader {
                signer: LumenKeypair::from_seed(&[2; 32]).public_key(),
                version: TRANSACTION_VERSION,
                network: NetworkType::Testnet,
                tx_type: TransactionType::AGGREGATE_COMPLETE,
            },
            body: TransactionBody::Raw(vec![1, 2, 3, 4]),
        };
        let bytes = embedded.to_bytes().unwrap();
        let back = EmbeddedTransaction::from_bytes(&bytes).unwrap();
        assert!(matches!(back.body, TransactionBody::Raw(_)));
    }

    #[test]
    fn size_equals_serialized_length() {
        let tx = transfer_tx();
        assert_eq!(tx.size(), tx.to_bytes().unwrap().len());
    }

    #[test]
    fn oversize_body_count_rejected_at_transaction_level() {
        let mut tx = transfer_tx();
        tx.body = TransactionBody::Transfer(TransferBody::new(
            recipient(),
            vec![],
            vec![0u8; 70_000],
        ));
        let err = tx.to_bytes().unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidFieldState {
                field: "message_size",
                ..
            }
        ));
    }

    #[test]
    fn oversize_body_count_rejected_inside_aggregate() {
        use crate::transaction::aggregate::AggregateBody;

        let embedded = EmbeddedTransaction {
            header: EmbeddedHeader {
                signer: LumenKeypair::from_seed(&[3; 32]).public_key(),
                version: TRANSACTION_VERSION,
                network: NetworkType::Testnet,
                tx_type: TransactionType::TRANSFER,
            },
            body: TransactionBody::Transfer(TransferBody::new(
                recipient(),
                vec![],
                vec![0u8; 70_000],
            )),
        };
        // The Merkle commitment serializes every embedded transaction, so
        // the bad count surfaces before the aggregate even exists.
        let err = AggregateBody::new(vec![embedded], vec![]).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidFieldState {
                field: "message_size",
                ..
            }
        ));
    }
}
