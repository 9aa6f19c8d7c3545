//! Ed25519 key material.
//!
//! Thin wrappers over `ed25519-dalek` that fix the crate's conventions:
//! hex for every textual form, explicit zeroed-signature placeholders for
//! unsigned payloads, and a keypair type that never leaks its secret
//! through `Debug` or serde.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};

/// Failures loading key material from external representations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The secret seed is not 32 bytes of valid hex.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// The public key bytes do not describe a point on the curve.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// An Ed25519 signing keypair.
///
/// Holds the secret; everything that can travel over a wire or into a log
/// goes through [`LumenPublicKey`] instead.
pub struct LumenKeypair {
    signing_key: SigningKey,
}

impl LumenKeypair {
    /// Generates a fresh random keypair from the OS entropy source.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds a keypair from a 32-byte seed. Deterministic; the same seed
    /// always yields the same keys.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Loads a keypair from a 64-character hex seed.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|e| KeyError::InvalidSecretKey(e.to_string()))?;
        let seed: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey("seed must be 32 bytes".into()))?;
        Ok(Self::from_seed(&seed))
    }

    /// The public half.
    pub fn public_key(&self) -> LumenPublicKey {
        LumenPublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Signs `message`, producing a detached 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> LumenSignature {
        LumenSignature(self.signing_key.sign(message).to_bytes())
    }

    /// Verifies a signature made by this keypair.
    pub fn verify(&self, message: &[u8], signature: &LumenSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// The raw 32-byte seed. Callers own keeping this off disk and out of
    /// logs.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl Clone for LumenKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for LumenKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The secret never appears in debug output.
        write!(f, "LumenKeypair(public: {})", self.public_key())
    }
}

impl PartialEq for LumenKeypair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for LumenKeypair {}

/// A 32-byte Ed25519 public key; identifies a signer on the wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LumenPublicKey(pub(crate) [u8; 32]);

impl LumenPublicKey {
    /// Byte width on the wire.
    pub const SIZE: usize = 32;

    /// Wraps raw bytes. Validity as a curve point is checked lazily at
    /// verification time.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey("public key must be 32 bytes".into()))?;
        Ok(Self(arr))
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded form, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Verifies `signature` over `message`. Bytes that are not a valid
    /// curve point verify nothing.
    pub fn verify(&self, message: &[u8], signature: &LumenSignature) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        key.verify(message, &sig).is_ok()
    }
}

impl Entity for LumenPublicKey {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.0);
    }
}

impl Decode for LumenPublicKey {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_array()?))
    }
}

impl fmt::Display for LumenPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for LumenPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumenPublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for LumenPublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for LumenPublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(D::Error::custom)
    }
}

/// A detached 64-byte Ed25519 signature.
///
/// [`LumenSignature::zero`] is the placeholder that fills the signature
/// field of an unsigned payload; the signing pipeline requires it there
/// before it will sign.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LumenSignature(pub(crate) [u8; 64]);

impl LumenSignature {
    /// Byte width on the wire.
    pub const SIZE: usize = 64;

    /// Wraps raw bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// The all-zero placeholder for unsigned payloads.
    pub fn zero() -> Self {
        Self([0u8; 64])
    }

    /// `true` for the unsigned placeholder.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Hex-encoded form, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Entity for LumenSignature {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.0);
    }
}

impl Decode for LumenSignature {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_array()?))
    }
}

impl fmt::Display for LumenSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for LumenSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LumenSignature({}..)", &self.to_hex()[..16])
    }
}

impl Serialize for LumenSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for LumenSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(D::Error::custom)?;
        let arr: [u8; 64] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| D::Error::custom("signature must be 64 bytes"))?;
        Ok(Self(arr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let kp = LumenKeypair::generate();
        let message = b"the quick brown fox";
        let sig = kp.sign(message);
        assert!(kp.verify(message, &sig));
        assert!(!kp.verify(b"a different message", &sig));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = LumenKeypair::from_seed(&[7u8; 32]);
        assert_eq!(kp.sign(b"abc"), kp.sign(b"abc"));
    }

    #[test]
    fn seed_determines_public_key() {
        let a = LumenKeypair::from_seed(&[1u8; 32]);
        let b = LumenKeypair::from_seed(&[1u8; 32]);
        let c = LumenKeypair::from_seed(&[2u8; 32]);
        assert_eq!(a.public_key(), b.public_key());
        assert_ne!(a.public_key(), c.public_key());
    }

    #[test]
    fn hex_seed_roundtrip() {
        let kp = LumenKeypair::from_seed(&[9u8; 32]);
        let hex_seed = hex::encode(kp.secret_key_bytes());
        let back = LumenKeypair::from_hex(&hex_seed).unwrap();
        assert_eq!(kp, back);
    }

    #[test]
    fn bad_hex_seed_rejected() {
        assert!(matches!(
            LumenKeypair::from_hex("deadbeef"),
            Err(KeyError::InvalidSecretKey(_))
        ));
        assert!(matches!(
            LumenKeypair::from_hex("zz"),
            Err(KeyError::InvalidSecretKey(_))
        ));
    }

    #[test]
    fn debug_never_prints_secret() {
        let kp = LumenKeypair::from_seed(&[3u8; 32]);
        let debug = format!("{kp:?}");
        assert!(!debug.contains(&hex::encode(kp.secret_key_bytes())));
        assert!(debug.contains(&kp.public_key().to_hex()));
    }

    #[test]
    fn zero_signature_is_placeholder() {
        assert!(LumenSignature::zero().is_zero());
        let kp = LumenKeypair::from_seed(&[5u8; 32]);
        assert!(!kp.sign(b"x").is_zero());
    }

    #[test]
    fn signature_survives_the_wire() {
        let kp = LumenKeypair::from_seed(&[8u8; 32]);
        let sig = kp.sign(b"payload");
        let bytes = sig.to_bytes().unwrap();
        assert_eq!(bytes.len(), LumenSignature::SIZE);
        let back = <LumenSignature as Decode>::from_bytes(&bytes).unwrap();
        assert!(kp.verify(b"payload", &back));
    }

    #[test]
    fn garbage_public_key_verifies_nothing() {
        // 0xFF.. is not a canonical curve point.
        let garbage = LumenPublicKey::from_bytes([0xFF; 32]);
        let kp = LumenKeypair::from_seed(&[4u8; 32]);
        let sig = kp.sign(b"m");
        assert!(!garbage.verify(b"m", &sig));
    }

    #[test]
    fn public_key_serde_is_hex_string() {
        let pk = LumenKeypair::from_seed(&[6u8; 32]).public_key();
        let json = serde_json::to_string(&pk).unwrap();
        assert_eq!(json, format!("\"{}\"", pk.to_hex()));
        let back: LumenPublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn known_seed_public_key_vector() {
        // Recorded vector: RFC 8032 key derivation for the fixed test seed.
        let seed: [u8; 32] = hex::decode(
            "0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20",
        )
        .unwrap()
        .try_into()
        .unwrap();
        let kp = LumenKeypair::from_seed(&seed);
        assert_eq!(
            kp.public_key().to_hex(),
            "79b5562e8fe654f94078b112e8a98ba7901f853ae695bed7e0e3910bad049664"
        );
    }
}
