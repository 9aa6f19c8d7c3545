//! # Protocol Value Types
//!
//! The vocabulary every transaction is written in: scalar newtypes for
//! amounts and identifiers, 32-byte hashes, 24-byte addresses with their
//! Base32 text codec, and the network/time types that anchor a transaction
//! to one chain instance.
//!
//! All of these are plain immutable values. They serialize through the
//! [`crate::codec`] traits and never allocate beyond what their byte form
//! requires.

mod address;
mod hash256;
mod network;
mod primitives;

pub use address::{Address, AddressError};
pub use hash256::Hash256;
pub use network::{Deadline, GenerationHash, NetworkType};
pub use primitives::{Amount, BlockDuration, NamespaceId, TokenId, TokenNonce, TokenQuantity};
