//! # Transactions
//!
//! Construction, serialization, dispatch and signing of LUMEN
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! entity_type.rs — TransactionType discriminant codes
//! header.rs      — 128-byte top-level and 48-byte embedded headers
//! transfer.rs    — transfer body
//! token.rs       — token definition and supply change bodies
//! namespace.rs   — namespace registration body
//! multisig.rs    — multisig modification body
//! restriction.rs — account address restriction body
//! key_link.rs    — account key link body
//! lock.rs        — hash lock body
//! aggregate.rs   — aggregate body, cosignatures, Merkle commitment
//! dispatch.rs    — Transaction/EmbeddedTransaction + (type, version) tables
//! builder.rs     — fluent construction of unsigned transactions
//! signing.rs     — the signing pipeline and SignedTransaction artifact
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** an unsigned transaction with [`TransactionBuilder`]; its
//!    signature and signer fields are zero placeholders.
//! 2. **Sign** it with [`sign_transaction`] (or the aggregate flows),
//!    binding the signature to one network's generation hash.
//! 3. **Submit** the resulting [`SignedTransaction`]'s hex payload; the
//!    transport layer lives outside this crate.
//! 4. **Parse** node-supplied bytes back with
//!    [`Transaction::from_bytes`](crate::codec::Decode::from_bytes);
//!    unknown type codes come back with raw bodies instead of errors.

pub mod aggregate;
pub mod builder;
pub mod dispatch;
pub mod entity_type;
pub mod header;
pub mod key_link;
pub mod lock;
pub mod multisig;
pub mod namespace;
pub mod restriction;
pub mod signing;
pub mod token;
pub mod transfer;

pub use aggregate::{
    compute_transactions_hash, AggregateBody, Cosignature, DetachedCosignature,
};
pub use builder::TransactionBuilder;
pub use dispatch::{EmbeddedTransaction, Transaction, TransactionBody};
pub use entity_type::TransactionType;
pub use header::{EmbeddedHeader, TransactionHeader};
pub use key_link::{AccountKeyLinkBody, LinkAction};
pub use lock::HashLockBody;
pub use multisig::MultisigModificationBody;
pub use namespace::{NamespaceRegistrationBody, NamespaceScope};
pub use restriction::{AccountAddressRestrictionBody, AccountRestrictionFlags};
pub use signing::{
    aggregate_cosigning_hash, cosign_detached, payload_hash, sign_aggregate_bonded,
    sign_aggregate_complete, sign_transaction, verify_signed_payload, SignedTransaction,
    SigningError,
};
pub use token::{SupplyAction, TokenDefinitionBody, TokenFlags, TokenSupplyChangeBody};
pub use transfer::TransferBody;
