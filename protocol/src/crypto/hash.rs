//! # Hashing Utilities
//!
//! Two hash functions, two jobs, no overlap:
//!
//! - **SHA-256** defines what the network agrees on: transaction hashes,
//!   address derivation, and the leaf hashes of an aggregate's embedded
//!   transactions. These are consensus-visible values, so the function is
//!   fixed forever.
//!
//! - **BLAKE3** builds the Merkle tree *above* those leaves. The interior
//!   of the tree is crate-internal structure, so it gets the faster hash.
//!
//! Everything else in the crate that needs a digest calls one of these
//! helpers instead of touching the hasher crates directly.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of `data` as a fixed-size array.
///
/// The array form propagates cleanly into [`crate::types::Hash256`]; there
/// is no `Vec` variant because no caller wants one.
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// SHA-256 over multiple byte slices fed sequentially.
///
/// Same digest as hashing the concatenation, without the temporary buffer.
/// This is how transaction hashes are computed: signature, signer,
/// generation hash and body are hashed in place from the payload they
/// already live in.
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute the BLAKE3 hash of `data`.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// BLAKE3 over multiple byte slices fed sequentially.
pub fn blake3_hash_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}

/// Compute a binary Merkle root over `leaves` with BLAKE3.
///
/// A plain binary tree: odd levels duplicate their last node, a single
/// leaf is paired with itself (the root is always the output of a hash,
/// never a raw leaf), and the empty tree is the all-zero sentinel. Leaf
/// uniqueness is the caller's problem; aggregates get it for free because
/// embedded transactions carry distinct signer/deadline fields.
pub fn merkle_root(leaves: &[[u8; 32]]) -> [u8; 32] {
    if leaves.is_empty() {
        return [0u8; 32];
    }

    let mut level: Vec<[u8; 32]> = leaves.to_vec();
    if level.len() == 1 {
        return blake3_hash_multi(&[level[0].as_slice(), level[0].as_slice()]);
    }

    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        for chunk in level.chunks(2) {
            let left = &chunk[0];
            let right = if chunk.len() == 2 { &chunk[1] } else { &chunk[0] };
            next.push(blake3_hash_multi(&[left.as_slice(), right.as_slice()]));
        }
        level = next;
    }

    level[0]
}
