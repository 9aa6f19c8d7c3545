//! Network addresses and their Base32 text codec.
//!
//! A LUMEN address is 24 raw bytes: a one-byte network tag, the first 20
//! bytes of the SHA-256 of the account's public key, and a 3-byte checksum
//! over the preceding 21 bytes. The text form is RFC 4648 Base32 without
//! padding -- 24 bytes always encode to exactly 39 characters, with three
//! spare bits that must be zero for the encoding to be canonical.
//!
//! On the wire an address is the 24 raw bytes verbatim; the checksum is a
//! property of the value, not re-verified by the binary codec. The *text*
//! codec is strict: length, alphabet, canonical spare bits and checksum are
//! all enforced, because text addresses come from humans and clipboards.

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::crypto::keys::LumenPublicKey;
use crate::types::network::NetworkType;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Errors from the address *text* codec. Binary parsing uses
/// [`CodecError`] like every other entity.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The encoded string is not exactly 39 characters.
    #[error("encoded address must be {expected} characters, got {got}")]
    InvalidLength {
        /// Required character count.
        expected: usize,
        /// What was supplied.
        got: usize,
    },

    /// A character outside the Base32 alphabet.
    #[error("invalid base32 character {0:?}")]
    InvalidCharacter(char),

    /// The trailing spare bits of the final character are non-zero, so the
    /// string is not the canonical encoding of any 24-byte value.
    #[error("non-canonical base32: trailing bits are not zero")]
    NonCanonical,

    /// The embedded 3-byte checksum does not match the address body.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// A 24-byte LUMEN address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; Address::SIZE]);

impl Address {
    /// Raw byte width: tag (1) + account hash (20) + checksum (3).
    pub const SIZE: usize = 24;

    /// Length of the Base32 text form.
    pub const ENCODED_SIZE: usize = 39;

    const CHECKSUM_SIZE: usize = 3;

    /// Wraps raw address bytes without checksum verification (the binary
    /// codec path; node-supplied bytes are trusted at this level).
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Derives the address of `public_key` on `network`.
    pub fn from_public_key(public_key: &LumenPublicKey, network: NetworkType) -> Self {
        let account_hash = Sha256::digest(public_key.as_bytes());
        let mut bytes = [0u8; Self::SIZE];
        bytes[0] = network.tag();
        bytes[1..21].copy_from_slice(&account_hash[..20]);
        let checksum = Self::checksum(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum);
        Self(bytes)
    }

    fn checksum(body: &[u8]) -> [u8; Self::CHECKSUM_SIZE] {
        let digest = Sha256::digest(body);
        let mut out = [0u8; Self::CHECKSUM_SIZE];
        out.copy_from_slice(&digest[..Self::CHECKSUM_SIZE]);
        out
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// The network tag byte (first byte of the address).
    pub fn network_tag(&self) -> u8 {
        self.0[0]
    }

    /// `true` if the embedded checksum matches the address body.
    pub fn has_valid_checksum(&self) -> bool {
        Self::checksum(&self.0[..21]) == self.0[21..]
    }

    /// Encodes to the 39-character Base32 text form.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(Self::ENCODED_SIZE);
        let mut acc: u32 = 0;
        let mut bits = 0u32;
        for &byte in &self.0 {
            acc = (acc << 8) | byte as u32;
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                out.push(BASE32_ALPHABET[((acc >> bits) & 0x1F) as usize] as char);
            }
        }
        // 24 bytes leave 2 bits; pad them out to a final character.
        if bits > 0 {
            out.push(BASE32_ALPHABET[((acc << (5 - bits)) & 0x1F) as usize] as char);
        }
        out
    }

    /// Decodes the 39-character text form, enforcing alphabet, canonical
    /// spare bits and the checksum.
    pub fn from_encoded(s: &str) -> Result<Self, AddressError> {
        if s.chars().count() != Self::ENCODED_SIZE {
            return Err(AddressError::InvalidLength {
                expected: Self::ENCODED_SIZE,
                got: s.chars().count(),
            });
        }

        let mut bytes = [0u8; Self::SIZE];
        let mut acc: u32 = 0;
        let mut bits = 0u32;
        let mut written = 0usize;
        for c in s.chars() {
            let value = match c {
                'A'..='Z' => c as u32 - 'A' as u32,
                '2'..='7' => c as u32 - '2' as u32 + 26,
                other => return Err(AddressError::InvalidCharacter(other)),
            };
            acc = (acc << 5) | value;
            bits += 5;
            if bits >= 8 {
                bits -= 8;
                bytes[written] = ((acc >> bits) & 0xFF) as u8;
                written += 1;
            }
        }
        debug_assert_eq!(written, Self::SIZE);
        // 39 characters carry 195 bits; the low 3 must be zero padding.
        if acc & ((1 << bits) - 1) != 0 {
            return Err(AddressError::NonCanonical);
        }

        let address = Self(bytes);
        if !address.has_valid_checksum() {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(address)
    }
}

impl Entity for Address {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.0);
    }
}

impl Decode for Address {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_array()?))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_encoded(&s).map_err(D::Error::custom)
    }
}
