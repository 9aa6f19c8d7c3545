//! The transaction signing pipeline.
//!
//! Three states, one direction: an unsigned transaction (signature and
//! signer zero-filled) yields its signing bytes, the signing bytes yield
//! a signature, and the signature is spliced back into the payload to
//! produce the final [`SignedTransaction`] artifact.
//!
//! The signing bytes are the payload from offset 108 (everything after
//! the signature/signer region) with the network's generation hash
//! appended, so a signature is worthless on any other network. The
//! transaction hash covers the signature, the signer, the generation
//! hash and the same payload tail, in that order.
//!
//! Ordering is the one correctness trap here: the signature must be
//! computed while the signature/signer region is still zero-filled, and
//! spliced in only afterwards. Signing an already spliced payload would
//! produce a structurally valid transaction with an unverifiable
//! signature, so the pipeline refuses to sign anything whose signature
//! region is not all zeros.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::codec::{CodecError, Entity};
use crate::config::{SIGNATURE_OFFSET, SIGNER_OFFSET, SIGNING_PREFIX_SIZE};
use crate::crypto::{sha256_multi, LumenKeypair, LumenPublicKey, LumenSignature};
use crate::transaction::aggregate::{Cosignature, DetachedCosignature};
use crate::transaction::dispatch::{Transaction, TransactionBody};
use crate::transaction::entity_type::TransactionType;
use crate::types::{GenerationHash, Hash256, NetworkType};

/// Failures of the signing pipeline.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The signature/signer region was not zero-filled before signing.
    #[error("signature and signer must be zero-filled before signing")]
    SigningPrecondition,

    /// An aggregate-only operation was applied to a non-aggregate type.
    #[error("transaction type {0:#06x} is not an aggregate")]
    NotAggregate(u16),

    /// Serialization of the transaction failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The final submittable artifact.
///
/// Produced only by this pipeline; the payload is the byte-exact form a
/// network node accepts, hex-encoded for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Hex-encoded signed payload.
    pub payload: String,
    /// Transaction hash; the network-side identity of this transaction.
    pub hash: Hash256,
    /// Public key of the signer.
    pub signer: LumenPublicKey,
    /// Transaction type, echoed from the header.
    pub tx_type: TransactionType,
    /// Network the signature is bound to.
    pub network: NetworkType,
}

impl SignedTransaction {
    /// Decodes the hex payload back to raw bytes.
    pub fn payload_bytes(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.payload)
    }
}

fn ensure_unsigned(payload: &[u8]) -> Result<(), SigningError> {
    let region = &payload[SIGNATURE_OFFSET..SIGNER_OFFSET + LumenPublicKey::SIZE];
    if region.iter().any(|&b| b != 0) {
        return Err(SigningError::SigningPrecondition);
    }
    Ok(())
}

/// Transaction hash over a serialized payload: `SHA-256(signature ||
/// signer || generation_hash || payload[108..])`. The leading size word
/// and reserved bytes never participate.
pub fn payload_hash(payload: &[u8], generation_hash: &GenerationHash) -> Hash256 {
    Hash256::from_bytes(sha256_multi(&[
        &payload[SIGNATURE_OFFSET..SIGNER_OFFSET],
        &payload[SIGNER_OFFSET..SIGNER_OFFSET + LumenPublicKey::SIZE],
        generation_hash.as_bytes(),
        &payload[SIGNING_PREFIX_SIZE..],
    ]))
}

/// Signs `tx` with `keypair`, binding the signature to `generation_hash`.
///
/// `tx` must carry the zero placeholders in its signature and signer
/// fields; anything else fails with
/// [`SigningError::SigningPrecondition`].
pub fn sign_transaction(
    tx: &Transaction,
    keypair: &LumenKeypair,
    generation_hash: &GenerationHash,
) -> Result<SignedTransaction, SigningError> {
    let mut payload = tx.to_bytes()?;
    ensure_unsigned(&payload)?;

    let mut signing = Vec::with_capacity(payload.len() - SIGNING_PREFIX_SIZE + 32);
    signing.extend_from_slice(&payload[SIGNING_PREFIX_SIZE..]);
    signing.extend_from_slice(generation_hash.as_bytes());
    let signature = keypair.sign(&signing);
    let signer = keypair.public_key();

    payload[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(signature.as_bytes());
    payload[SIGNER_OFFSET..SIGNER_OFFSET + LumenPublicKey::SIZE]
        .copy_from_slice(signer.as_bytes());

    let hash = payload_hash(&payload, generation_hash);
    debug!(
        tx_type = tx.header.tx_type.code(),
        size = payload.len(),
        hash = %hash,
        "signed transaction"
    );

    Ok(SignedTransaction {
        payload: hex::encode(&payload),
        hash,
        signer,
        tx_type: tx.header.tx_type,
        network: tx.header.network,
    })
}

/// Verifies a signed payload against its embedded signer key and
/// `generation_hash`. Payloads too short to carry a header verify
/// nothing.
pub fn verify_signed_payload(payload: &[u8], generation_hash: &GenerationHash) -> bool {
    if payload.len() < SIGNING_PREFIX_SIZE {
        return false;
    }
    let mut sig = [0u8; 64];
    sig.copy_from_slice(&payload[SIGNATURE_OFFSET..SIGNER_OFFSET]);
    let mut key = [0u8; 32];
    key.copy_from_slice(&payload[SIGNER_OFFSET..SIGNER_OFFSET + 32]);

    let mut signing = Vec::with_capacity(payload.len() - SIGNING_PREFIX_SIZE + 32);
    signing.extend_from_slice(&payload[SIGNING_PREFIX_SIZE..]);
    signing.extend_from_slice(generation_hash.as_bytes());

    LumenPublicKey::from_bytes(key).verify(&signing, &LumenSignature::from_bytes(sig))
}

/// Hash the cosignatories of an aggregate sign.
///
/// Defined over the aggregate's unsigned payload (zero-filled signature
/// and signer), so every party can compute it before the initiator has
/// signed. The post-signing transaction hash differs from this value.
pub fn aggregate_cosigning_hash(
    tx: &Transaction,
    generation_hash: &GenerationHash,
) -> Result<Hash256, SigningError> {
    if !tx.header.tx_type.is_aggregate() {
        return Err(SigningError::NotAggregate(tx.header.tx_type.code()));
    }
    let payload = tx.to_bytes()?;
    ensure_unsigned(&payload)?;
    Ok(payload_hash(&payload, generation_hash))
}

/// Complete-aggregate flow: every cosignatory signs the cosigning hash,
/// the cosignatures are attached, and only then does the initiator sign
/// the whole aggregate.
pub fn sign_aggregate_complete(
    mut tx: Transaction,
    initiator: &LumenKeypair,
    cosignatories: &[&LumenKeypair],
    generation_hash: &GenerationHash,
) -> Result<SignedTransaction, SigningError> {
    if tx.header.tx_type != TransactionType::AGGREGATE_COMPLETE {
        return Err(SigningError::NotAggregate(tx.header.tx_type.code()));
    }
    let cosigning_hash = aggregate_cosigning_hash(&tx, generation_hash)?;

    match &mut tx.body {
        TransactionBody::Aggregate(body) => {
            for cosignatory in cosignatories {
                body.cosignatures
                    .push(Cosignature::sign(cosignatory, &cosigning_hash));
            }
        }
        _ => return Err(SigningError::NotAggregate(tx.header.tx_type.code())),
    }

    sign_transaction(&tx, initiator, generation_hash)
}

/// Bonded-aggregate flow: the initiator signs and submits without
/// cosignatures; cosignatories produce [`DetachedCosignature`] records
/// against the resulting hash, at their own pace.
pub fn sign_aggregate_bonded(
    tx: &Transaction,
    initiator: &LumenKeypair,
    generation_hash: &GenerationHash,
) -> Result<SignedTransaction, SigningError> {
    if tx.header.tx_type != TransactionType::AGGREGATE_BONDED {
        return Err(SigningError::NotAggregate(tx.header.tx_type.code()));
    }
    sign_transaction(tx, initiator, generation_hash)
}

/// Produces a detached cosignature for a bonded aggregate already
/// submitted under `parent_hash`.
pub fn cosign_detached(keypair: &LumenKeypair, parent_hash: Hash256) -> DetachedCosignature {
    DetachedCosignature::sign(keypair, parent_hash)
}
