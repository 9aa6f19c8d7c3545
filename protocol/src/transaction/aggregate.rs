//! Aggregate transaction body and cosignatures.
//!
//! An aggregate packs independently built transactions from one or more
//! accounts into a single atomic unit. Its body is the one place both
//! collection termination conventions meet: the embedded transactions
//! fill a byte budget declared by `payload_size` (each padded to an
//! 8-byte boundary), and the cosignatures fill whatever bytes remain in
//! the transaction, with no count anywhere.
//!
//! `transactions_hash` commits to the embedded list: a Merkle root over
//! the SHA-256 hash of each embedded transaction's serialized bytes, in
//! order. Order is semantically significant; swapping two embedded
//! transactions changes the root and invalidates every signature.

use serde::{Deserialize, Serialize};

use crate::codec::{
    collection_size, read_byte_budget, write_collection, ByteReader, ByteWriter, CodecError,
    Decode, Entity,
};
use crate::config::{COSIGNATURE_SIZE, COSIGNATURE_VERSION, EMBEDDED_ALIGNMENT};
use crate::crypto::{merkle_root, sha256_array, LumenKeypair, LumenPublicKey, LumenSignature};
use crate::transaction::dispatch::EmbeddedTransaction;
use crate::types::Hash256;

/// A secondary signer's signature over an aggregate's hash.
///
/// Wire layout: `version:u64 | signer:32 | signature:64`, 104 bytes,
/// no padding between records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosignature {
    /// Cosignature format version.
    pub version: u64,
    /// The cosignatory's public key.
    pub signer: LumenPublicKey,
    /// Ed25519 signature over the aggregate's transaction hash.
    pub signature: LumenSignature,
}

impl Cosignature {
    /// Byte width on the wire.
    pub const SIZE: usize = COSIGNATURE_SIZE;

    /// Signs `hash` with `keypair`, producing an attachable record.
    pub fn sign(keypair: &LumenKeypair, hash: &Hash256) -> Self {
        Self {
            version: COSIGNATURE_VERSION,
            signer: keypair.public_key(),
            signature: keypair.sign(hash.as_bytes()),
        }
    }

    /// Verifies this cosignature against `hash`.
    pub fn verify(&self, hash: &Hash256) -> bool {
        self.signer.verify(hash.as_bytes(), &self.signature)
    }
}

impl Entity for Cosignature {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u64(self.version);
        self.signer.write(w);
        self.signature.write(w);
    }
}

impl Decode for Cosignature {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            version: r.read_u64()?,
            signer: LumenPublicKey::read(r)?,
            signature: LumenSignature::read(r)?,
        })
    }
}

/// A cosignature produced away from the aggregate it belongs to.
///
/// Carries the parent transaction hash so the network can match it to a
/// pending bonded aggregate; this crate only constructs the record, the
/// matching happens node-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetachedCosignature {
    /// Transaction hash of the bonded aggregate being cosigned.
    pub parent_hash: Hash256,
    /// The cosignature itself.
    pub cosignature: Cosignature,
}

impl DetachedCosignature {
    /// Cosigns the aggregate identified by `parent_hash`.
    pub fn sign(keypair: &LumenKeypair, parent_hash: Hash256) -> Self {
        Self {
            cosignature: Cosignature::sign(keypair, &parent_hash),
            parent_hash,
        }
    }

    /// Verifies the inner cosignature against the parent hash.
    pub fn verify(&self) -> bool {
        self.cosignature.verify(&self.parent_hash)
    }
}

/// Body of an aggregate transaction.
///
/// Wire layout: `transactions_hash:32 | payload_size:u32 | reserved:u32 |
/// embedded transactions (payload_size bytes, each 8-aligned) |
/// cosignatures (remaining bytes, 104 each)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateBody {
    /// Merkle commitment to the embedded transaction list.
    pub transactions_hash: Hash256,
    /// The embedded transactions, in commitment order.
    pub transactions: Vec<EmbeddedTransaction>,
    /// Attached cosignatures; may be empty for bonded aggregates.
    pub cosignatures: Vec<Cosignature>,
}

impl AggregateBody {
    /// Builds a body whose `transactions_hash` commits to `transactions`.
    pub fn new(
        transactions: Vec<EmbeddedTransaction>,
        cosignatures: Vec<Cosignature>,
    ) -> Result<Self, CodecError> {
        let transactions_hash = compute_transactions_hash(&transactions)?;
        Ok(Self {
            transactions_hash,
            transactions,
            cosignatures,
        })
    }

    /// Byte length of the embedded transaction region, padding included.
    pub fn payload_size(&self) -> usize {
        collection_size(&self.transactions, EMBEDDED_ALIGNMENT)
    }
}

impl Entity for AggregateBody {
    fn size(&self) -> usize {
        Hash256::SIZE + 4 + 4 + self.payload_size() + self.cosignatures.len() * Cosignature::SIZE
    }

    fn check(&self) -> Result<(), CodecError> {
        if self.payload_size() > u32::MAX as usize {
            return Err(CodecError::InvalidFieldState {
                field: "payload_size",
                reason: "embedded region larger than the u32 size field carries",
            });
        }
        for tx in &self.transactions {
            tx.check()?;
        }
        Ok(())
    }

    fn write(&self, w: &mut ByteWriter) {
        self.transactions_hash.write(w);
        w.write_u32(self.payload_size() as u32);
        w.write_zeros(4);
        write_collection(w, &self.transactions, EMBEDDED_ALIGNMENT);
        write_collection(w, &self.cosignatures, 0);
    }
}

impl Decode for AggregateBody {
    /// Consumes the whole remaining region of `r`: the caller (the
    /// dispatch layer) slices the body region off the payload first,
    /// which is what lets the cosignature list terminate on "no bytes
    /// left" instead of a count.
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let transactions_hash = Hash256::read(r)?;
        let payload_size = r.read_u32()? as usize;
        r.read_reserved_u32("aggregate_body_reserved")?;
        let transactions = read_byte_budget(
            r,
            payload_size,
            EMBEDDED_ALIGNMENT,
            EmbeddedTransaction::read,
        )?;
        let mut cosignatures = Vec::new();
        while !r.at_end() {
            cosignatures.push(Cosignature::read(r)?);
        }
        Ok(Self {
            transactions_hash,
            transactions,
            cosignatures,
        })
    }
}

/// Merkle root over the SHA-256 leaf hash of each embedded transaction's
/// serialized (unpadded) bytes, in list order.
pub fn compute_transactions_hash(
    transactions: &[EmbeddedTransaction],
) -> Result<Hash256, CodecError> {
    let mut leaves = Vec::with_capacity(transactions.len());
    for tx in transactions {
        leaves.push(sha256_array(&tx.to_bytes()?));
    }
    Ok(Hash256::from_bytes(merkle_root(&leaves)))
}
