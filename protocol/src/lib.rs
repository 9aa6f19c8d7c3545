// Copyright (c) 2026 Lumen Labs. MIT License.
// See LICENSE for details.

//! # LUMEN Protocol — Wire Codec & Signing
//!
//! This crate turns in-memory transaction and account objects into the
//! byte-exact payloads a LUMEN network node accepts, and parses
//! node-supplied bytes back into typed objects. It is deliberately a
//! codec and signing library, nothing more: no transport, no consensus,
//! no wallet storage. You hand it key material and a generation hash; it
//! hands back hex payloads and transaction hashes.
//!
//! ## Architecture
//!
//! The modules mirror the layers of the problem:
//!
//! - **codec** — The generic wire discipline: little-endian readers and
//!   writers, self-sizing entities, counted collections, alignment
//!   padding. Everything else is built on these traits.
//! - **types** — The protocol vocabulary: amounts, token ids, hashes,
//!   addresses, networks, deadlines.
//! - **crypto** — Ed25519 keys and the two hash functions (SHA-256 for
//!   consensus-visible digests, BLAKE3 for Merkle tree interiors).
//! - **account** — A keypair bound to a network, with its address.
//! - **transaction** — Headers, one module per body family, the
//!   (type, version) dispatch tables, builders, and the signing
//!   pipeline that produces submittable artifacts.
//! - **config** — The byte-layout constants, in one place.
//!
//! ## Design Philosophy
//!
//! 1. The wire format is hand-rolled, never serde: byte layout is a
//!    consensus rule, not a serialization detail.
//! 2. `size()` must equal the bytes `write()` emits, always; every
//!    serialization checks it.
//! 3. Signatures are computed over zero-filled placeholders and spliced
//!    in afterwards. The pipeline refuses any other order.
//! 4. If it touches money, it has tests. Plural.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lumen_protocol::account::Account;
//! use lumen_protocol::transaction::{TransactionBuilder, TransactionBody, TransferBody};
//! use lumen_protocol::types::{Amount, Deadline, GenerationHash, NetworkType};
//!
//! let account = Account::generate(NetworkType::Testnet);
//! let recipient = Account::generate(NetworkType::Testnet).address();
//! let generation_hash = GenerationHash::from_hex(
//!     "87f7e2efaf212ec1318ccce5d82f478539e8c2211407f18750bdd07dadc6ad73",
//! ).unwrap();
//!
//! let tx = TransactionBuilder::new(NetworkType::Testnet)
//!     .max_fee(Amount(2_000_000))
//!     .deadline(Deadline(8_217_600_000))
//!     .build(TransactionBody::Transfer(TransferBody::new(
//!         recipient,
//!         vec![],
//!         b"hello".to_vec(),
//!     )))
//!     .unwrap();
//!
//! let signed = account.sign(&tx, &generation_hash).unwrap();
//! println!("{} {}", signed.hash, signed.payload);
//! ```

pub mod account;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod transaction;
pub mod types;

pub use account::Account;
pub use codec::{CodecError, Decode, Entity};
pub use transaction::{SignedTransaction, Transaction, TransactionBuilder};
