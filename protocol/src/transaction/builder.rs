//! Unsigned transaction construction via the builder pattern.
//!
//! The builder holds the header-level choices (network, fee, deadline)
//! and stamps them onto any body handed to it, producing an unsigned
//! [`Transaction`] with the zero signature/signer placeholders the
//! signing pipeline expects. The builder does not sign; that happens in
//! [`super::signing`], which keeps construction testable without key
//! material.

use crate::codec::CodecError;
use crate::config::TRANSACTION_VERSION;
use crate::crypto::{LumenPublicKey, LumenSignature};
use crate::transaction::aggregate::AggregateBody;
use crate::transaction::dispatch::{EmbeddedTransaction, Transaction, TransactionBody};
use crate::transaction::entity_type::TransactionType;
use crate::transaction::header::{EmbeddedHeader, TransactionHeader};
use crate::types::{Amount, Deadline, NetworkType};

/// Fluent builder for unsigned transactions.
///
/// # Usage
///
/// ```rust,no_run
/// use lumen_protocol::transaction::{TransactionBuilder, TransactionBody, TransferBody};
/// use lumen_protocol::types::{Address, Amount, Deadline, NetworkType};
///
/// # let recipient: Address = todo!();
/// let tx = TransactionBuilder::new(NetworkType::Testnet)
///     .max_fee(Amount(2_000_000))
///     .deadline(Deadline(8_217_600_000))
///     .build(TransactionBody::Transfer(TransferBody::new(
///         recipient,
///         vec![],
///         b"memo".to_vec(),
///     )))
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network: NetworkType,
    version: u8,
    max_fee: Amount,
    deadline: Deadline,
}

impl TransactionBuilder {
    /// Creates a builder targeting `network`. Fee and deadline default to
    /// zero and should be set before building anything submittable.
    pub fn new(network: NetworkType) -> Self {
        Self {
            network,
            version: TRANSACTION_VERSION,
            max_fee: Amount(0),
            deadline: Deadline(0),
        }
    }

    /// Sets the format version. Only needed when testing version skew.
    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Sets the maximum fee the signer will pay.
    pub fn max_fee(mut self, max_fee: Amount) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Sets the transaction deadline.
    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    fn header(&self, tx_type: TransactionType) -> TransactionHeader {
        TransactionHeader {
            signature: LumenSignature::zero(),
            signer: LumenPublicKey::from_bytes([0u8; 32]),
            version: self.version,
            network: self.network,
            tx_type,
            max_fee: self.max_fee,
            deadline: self.deadline,
        }
    }

    /// Builds an unsigned transaction around `body`, deriving the type
    /// code from the body variant.
    ///
    /// Fails with [`CodecError::InvalidFieldState`] for bodies that do
    /// not determine their own type (raw and aggregate bodies); use
    /// [`TransactionBuilder::build_with_type`] or the aggregate helpers
    /// for those.
    pub fn build(self, body: TransactionBody) -> Result<Transaction, CodecError> {
        let tx_type = body
            .transaction_type()
            .ok_or(CodecError::InvalidFieldState {
                field: "tx_type",
                reason: "body does not determine a transaction type",
            })?;
        Ok(self.build_with_type(tx_type, body))
    }

    /// Builds an unsigned transaction with an explicit type code.
    pub fn build_with_type(self, tx_type: TransactionType, body: TransactionBody) -> Transaction {
        Transaction {
            header: self.header(tx_type),
            body,
        }
    }

    /// Builds a complete aggregate from `transactions`, computing the
    /// Merkle commitment. Cosignatures are attached by the signing flow.
    pub fn build_aggregate_complete(
        self,
        transactions: Vec<EmbeddedTransaction>,
    ) -> Result<Transaction, CodecError> {
        let body = AggregateBody::new(transactions, Vec::new())?;
        Ok(self.build_with_type(
            TransactionType::AGGREGATE_COMPLETE,
            TransactionBody::Aggregate(body),
        ))
    }

    /// Builds a bonded aggregate from `transactions`.
    pub fn build_aggregate_bonded(
        self,
        transactions: Vec<EmbeddedTransaction>,
    ) -> Result<Transaction, CodecError> {
        let body = AggregateBody::new(transactions, Vec::new())?;
        Ok(self.build_with_type(
            TransactionType::AGGREGATE_BONDED,
            TransactionBody::Aggregate(body),
        ))
    }

    /// Builds an embedded transaction for `signer`, deriving the type
    /// code from the body variant. Fee and deadline do not apply inside
    /// an aggregate and are ignored.
    pub fn build_embedded(
        &self,
        signer: LumenPublicKey,
        body: TransactionBody,
    ) -> Result<EmbeddedTransaction, CodecError> {
        let tx_type = body
            .transaction_type()
            .ok_or(CodecError::InvalidFieldState {
                field: "tx_type",
                reason: "body does not determine a transaction type",
            })?;
        Ok(EmbeddedTransaction {
            header: EmbeddedHeader {
                signer,
                version: self.version,
                network: self.network,
                tx_type,
            },
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Entity;
    use crate::crypto::LumenKeypair;
    use crate::transaction::aggregate::compute_transactions_hash;
    use crate::transaction::transfer::TransferBody;
    use crate::types::{Address, TokenId, TokenQuantity};

    fn recipient() -> Address {
        Address::from_public_key(
            &LumenKeypair::from_seed(&[0x42; 32]).public_key(),
            NetworkType::Testnet,
        )
    }

    fn transfer_body() -> TransactionBody {
        TransactionBody::Transfer(TransferBody::new(
            recipient(),
            vec![TokenQuantity::new(TokenId(1), Amount(10))],
            b"m".to_vec(),
        ))
    }

    #[test]
    fn built_transaction_is_unsigned() {
        let tx = TransactionBuilder::new(NetworkType::Testnet)
            .max_fee(Amount(100))
            .deadline(Deadline(1_000))
            .build(transfer_body())
            .unwrap();
        assert!(tx.header.signature.is_zero());
        assert_eq!(tx.header.signer.as_bytes(), &[0u8; 32]);
        assert_eq!(tx.header.tx_type, TransactionType::TRANSFER);
        assert_eq!(tx.header.network, NetworkType::Testnet);
    }

    #[test]
    fn size_word_matches_serialized_length() {
        let tx = TransactionBuilder::new(NetworkType::Testnet)
            .build(transfer_body())
            .unwrap();
        let bytes = tx.to_bytes().unwrap();
        let declared = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        assert_eq!(declared as usize, bytes.len());
    }

    #[test]
    fn aggregate_builder_commits_to_transactions() {
        let builder = TransactionBuilder::new(NetworkType::Testnet);
        let embedded = builder
            .build_embedded(
                LumenKeypair::from_seed(&[1; 32]).public_key(),
                transfer_body(),
            )
            .unwrap();
        let expected = compute_transactions_hash(&[embedded.clone()]).unwrap();

        let tx = builder
            .build_aggregate_complete(vec![embedded])
            .unwrap();
        assert_eq!(tx.header.tx_type, TransactionType::AGGREGATE_COMPLETE);
        match tx.body {
            TransactionBody::Aggregate(body) => {
                assert_eq!(body.transactions_hash, expected);
                assert!(body.cosignatures.is_empty());
            }
            other => panic!("expected aggregate body, got {other:?}"),
        }
    }

    #[test]
    fn bonded_builder_sets_bonded_type() {
        let tx = TransactionBuilder::new(NetworkType::Testnet)
            .build_aggregate_bonded(vec![])
            .unwrap();
        assert_eq!(tx.header.tx_type, TransactionType::AGGREGATE_BONDED);
    }

    #[test]
    fn raw_body_needs_explicit_type() {
        let err = TransactionBuilder::new(NetworkType::Testnet)
            .build(TransactionBody::Raw(vec![1, 2, 3]))
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidFieldState { .. }));

        let tx = TransactionBuilder::new(NetworkType::Testnet)
            .build_with_type(TransactionType(0x0999), TransactionBody::Raw(vec![1, 2, 3]));
        assert_eq!(tx.header.tx_type, TransactionType(0x0999));
    }
}
