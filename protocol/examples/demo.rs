//! End-to-end walkthrough: build, sign and parse LUMEN transactions.
//!
//! Run with `cargo run --example demo`. Set `RUST_LOG=debug` to watch
//! the signing pipeline log its work.

use lumen_protocol::account::Account;
use lumen_protocol::codec::{Decode, Entity};
use lumen_protocol::transaction::{
    sign_aggregate_complete, Transaction, TransactionBody, TransactionBuilder, TransferBody,
};
use lumen_protocol::types::{Amount, Deadline, GenerationHash, NetworkType, TokenId, TokenQuantity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let network = NetworkType::Testnet;
    let generation_hash = GenerationHash::from_hex(
        "87f7e2efaf212ec1318ccce5d82f478539e8c2211407f18750bdd07dadc6ad73",
    )?;

    let alice = Account::generate(network);
    let bob = Account::generate(network);
    println!("alice: {}", alice.address());
    println!("bob:   {}", bob.address());

    // A plain transfer from alice to bob.
    let builder = TransactionBuilder::new(network)
        .max_fee(Amount(2_000_000))
        .deadline(Deadline::from_now(network, chrono::Duration::hours(2)));
    let transfer = builder.clone().build(TransactionBody::Transfer(TransferBody::new(
        bob.address(),
        vec![TokenQuantity::new(TokenId(0x0123456789ABCDEF), Amount(1_000_000))],
        b"hello lumen".to_vec(),
    )))?;

    let signed = alice.sign(&transfer, &generation_hash)?;
    println!("\ntransfer hash:    {}", signed.hash);
    println!("transfer payload: {}", signed.payload);

    // Parse the payload back, as a node would.
    let parsed = Transaction::from_bytes(&signed.payload_bytes()?)?;
    println!("parsed type:      {}", parsed.header.tx_type);
    println!("parsed size:      {} bytes", parsed.to_bytes()?.len());

    // An atomic swap: alice and bob each contribute one embedded
    // transfer; bob cosigns, alice initiates.
    let to_bob = builder.build_embedded(
        alice.public_key(),
        TransactionBody::Transfer(TransferBody::new(
            bob.address(),
            vec![TokenQuantity::new(TokenId(1), Amount(500))],
            vec![],
        )),
    )?;
    let to_alice = builder.build_embedded(
        bob.public_key(),
        TransactionBody::Transfer(TransferBody::new(
            alice.address(),
            vec![TokenQuantity::new(TokenId(2), Amount(300))],
            vec![],
        )),
    )?;
    let aggregate = builder.clone().build_aggregate_complete(vec![to_bob, to_alice])?;
    let signed_aggregate = sign_aggregate_complete(
        aggregate,
        alice.keypair(),
        &[bob.keypair()],
        &generation_hash,
    )?;
    println!("\naggregate hash:   {}", signed_aggregate.hash);
    println!(
        "aggregate size:   {} bytes",
        signed_aggregate.payload_bytes()?.len()
    );

    Ok(())
}
