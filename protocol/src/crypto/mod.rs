//! # Cryptographic Primitives
//!
//! Every signature and every digest in the crate flows through here. The
//! choices are deliberately boring and well audited:
//!
//! - **Ed25519** for signatures. Deterministic, fast, unbroken.
//! - **SHA-256** for consensus-visible digests (transaction hashes,
//!   address derivation, aggregate leaf hashes).
//! - **BLAKE3** for crate-internal structure (Merkle tree interiors).
//!
//! Nothing in this module rolls its own cryptography; these are thin,
//! type-safe wrappers around the audited implementations.

pub mod hash;
pub mod keys;

pub use hash::{blake3_hash, blake3_hash_multi, merkle_root, sha256_array, sha256_multi};
pub use keys::{KeyError, LumenKeypair, LumenPublicKey, LumenSignature};
