//! Transaction headers.
//!
//! Two header shapes share the (type, version) discriminant:
//!
//! - [`TransactionHeader`] fronts a top-level transaction: 128 bytes
//!   carrying the size word, signature, signer, network, fee and deadline.
//! - [`EmbeddedHeader`] fronts a transaction nested inside an aggregate:
//!   48 bytes, with signature, fee and deadline hoisted to the aggregate.
//!
//! Neither struct stores the leading size word; the enclosing transaction
//! computes it from the body at write time and verifies it at parse time,
//! so a header value can never disagree with the bytes around it.

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::config::{EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE};
use crate::crypto::{LumenPublicKey, LumenSignature};
use crate::transaction::entity_type::TransactionType;
use crate::types::{Amount, Deadline, NetworkType};

/// Header of a top-level transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Ed25519 signature; zero-filled until the signing pipeline runs.
    pub signature: LumenSignature,
    /// Signer public key; zero-filled until the signing pipeline runs.
    pub signer: LumenPublicKey,
    /// Transaction format version.
    pub version: u8,
    /// Network this transaction targets.
    pub network: NetworkType,
    /// Body discriminant.
    pub tx_type: TransactionType,
    /// Maximum fee the signer will pay, in the network's base token.
    pub max_fee: Amount,
    /// Expiry, in milliseconds since the network epoch.
    pub deadline: Deadline,
}

impl TransactionHeader {
    /// Serialized header width, size word included.
    pub const SIZE: usize = TRANSACTION_HEADER_SIZE;

    /// Writes the full 128-byte header. `total_size` is the size of the
    /// whole transaction (header plus body) and lands in the leading word.
    pub fn write_with_size(&self, w: &mut ByteWriter, total_size: u32) {
        w.write_u32(total_size);
        w.write_zeros(4);
        self.signature.write(w);
        self.signer.write(w);
        w.write_zeros(4);
        w.write_u8(self.version);
        self.network.write(w);
        self.tx_type.write(w);
        self.max_fee.write(w);
        self.deadline.write(w);
    }

    /// Reads the header, returning the declared total size alongside it.
    pub fn read(r: &mut ByteReader<'_>) -> Result<(u32, Self), CodecError> {
        let declared = r.read_u32()?;
        r.read_reserved_u32("verifiable_entity_header_reserved")?;
        let signature = LumenSignature::read(r)?;
        let signer = LumenPublicKey::read(r)?;
        r.read_reserved_u32("entity_body_reserved")?;
        let version = r.read_u8()?;
        let network = NetworkType::read(r)?;
        let tx_type = TransactionType::read(r)?;
        let max_fee = Amount::read(r)?;
        let deadline = Deadline::read(r)?;
        Ok((
            declared,
            Self {
                signature,
                signer,
                version,
                network,
                tx_type,
                max_fee,
                deadline,
            },
        ))
    }
}

/// Header of a transaction embedded inside an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedHeader {
    /// Public key of the account this embedded transaction acts for.
    pub signer: LumenPublicKey,
    /// Transaction format version.
    pub version: u8,
    /// Network this transaction targets.
    pub network: NetworkType,
    /// Body discriminant.
    pub tx_type: TransactionType,
}

impl EmbeddedHeader {
    /// Serialized header width, size word included.
    pub const SIZE: usize = EMBEDDED_HEADER_SIZE;

    /// Writes the full 48-byte header with the declared total size.
    pub fn write_with_size(&self, w: &mut ByteWriter, total_size: u32) {
        w.write_u32(total_size);
        w.write_zeros(4);
        self.signer.write(w);
        w.write_zeros(4);
        w.write_u8(self.version);
        self.network.write(w);
        self.tx_type.write(w);
    }

    /// Reads the header, returning the declared total size alongside it.
    pub fn read(r: &mut ByteReader<'_>) -> Result<(u32, Self), CodecError> {
        let declared = r.read_u32()?;
        r.read_reserved_u32("embedded_header_reserved")?;
        let signer = LumenPublicKey::read(r)?;
        r.read_reserved_u32("embedded_body_reserved")?;
        let version = r.read_u8()?;
        let network = NetworkType::read(r)?;
        let tx_type = TransactionType::read(r)?;
        Ok((
            declared,
            Self {
                signer,
                version,
                network,
                tx_type,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TRANSACTION_VERSION;
    use crate::crypto::LumenKeypair;

    fn sample_header() -> TransactionHeader {
        TransactionHeader {
            signature: LumenSignature::zero(),
            signer: LumenKeypair::from_seed(&[1; 32]).public_key(),
            version: TRANSACTION_VERSION,
            network: NetworkType::Testnet,
            tx_type: TransactionType::TRANSFER,
            max_fee: Amount(2_000_000),
            deadline: Deadline(8_217_600_000),
        }
    }

    #[test]
    fn header_is_exactly_128_bytes() {
        let header = sample_header();
        let mut w = ByteWriter::new();
        header.write_with_size(&mut w, 187);
        assert_eq!(w.len(), TransactionHeader::SIZE);
    }

    #[test]
    fn header_roundtrip_preserves_declared_size() {
        let header = sample_header();
        let mut w = ByteWriter::new();
        header.write_with_size(&mut w, 0xDEAD);
        let bytes = w.into_bytes();

        let mut r = ByteReader::new(&bytes);
        let (declared, back) = TransactionHeader::read(&mut r).unwrap();
        assert_eq!(declared, 0xDEAD);
        assert_eq!(back, header);
        assert!(r.at_end());
    }

    #[test]
    fn field_offsets_match_layout() {
        let header = sample_header();
        let mut w = ByteWriter::new();
        header.write_with_size(&mut w, 187);
        let bytes = w.into_bytes();

        assert_eq!(&bytes[0..4], &187u32.to_le_bytes());
        assert!(bytes[4..8].iter().all(|&b| b == 0));
        assert!(bytes[8..72].iter().all(|&b| b == 0), "zero signature");
        assert_eq!(&bytes[72..104], header.signer.as_bytes());
        assert!(bytes[104..108].iter().all(|&b| b == 0));
        assert_eq!(bytes[108], TRANSACTION_VERSION);
        assert_eq!(bytes[109], NetworkType::Testnet.tag());
        assert_eq!(&bytes[110..112], &0x0154u16.to_le_bytes());
    }

    #[test]
    fn nonzero_reserved_rejected() {
        let header = sample_header();
        let mut w = ByteWriter::new();
        header.write_with_size(&mut w, 187);
        let mut bytes = w.into_bytes();
        bytes[5] = 1;

        let mut r = ByteReader::new(&bytes);
        let err = TransactionHeader::read(&mut r).unwrap_err();
        assert!(matches!(err, CodecError::NonZeroReserved { .. }));
    }

    #[test]
    fn embedded_header_is_exactly_48_bytes() {
        let header = EmbeddedHeader {
            signer: LumenKeypair::from_seed(&[2; 32]).public_key(),
            version: TRANSACTION_VERSION,
            network: NetworkType::Testnet,
            tx_type: TransactionType::TRANSFER,
        };
        let mut w = ByteWriter::new();
        header.write_with_size(&mut w, 100);
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), EmbeddedHeader::SIZE);

        let mut r = ByteReader::new(&bytes);
        let (declared, back) = EmbeddedHeader::read(&mut r).unwrap();
        assert_eq!(declared, 100);
        assert_eq!(back, header);
    }
}
