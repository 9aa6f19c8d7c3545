//! Criterion benchmarks for the hot paths: key operations, transaction
//! serialization, signing and parsing. Run with `cargo bench`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lumen_protocol::codec::{Decode, Entity};
use lumen_protocol::crypto::LumenKeypair;
use lumen_protocol::transaction::{
    sign_transaction, Transaction, TransactionBody, TransactionBuilder, TransferBody,
};
use lumen_protocol::types::{
    Address, Amount, Deadline, GenerationHash, NetworkType, TokenId, TokenQuantity,
};

fn fixtures() -> (LumenKeypair, GenerationHash, Transaction) {
    let keypair = LumenKeypair::from_seed(&[0x11; 32]);
    let generation_hash = GenerationHash::from_hex(
        "87f7e2efaf212ec1318ccce5d82f478539e8c2211407f18750bdd07dadc6ad73",
    )
    .unwrap();
    let recipient = Address::from_public_key(
        &LumenKeypair::from_seed(&[0x42; 32]).public_key(),
        NetworkType::Testnet,
    );
    let tx = TransactionBuilder::new(NetworkType::Testnet)
        .max_fee(Amount(2_000_000))
        .deadline(Deadline(8_217_600_000))
        .build(TransactionBody::Transfer(TransferBody::new(
            recipient,
            vec![TokenQuantity::new(TokenId(1), Amount(1_000_000))],
            b"benchmark message".to_vec(),
        )))
        .unwrap();
    (keypair, generation_hash, tx)
}

fn bench_keys(c: &mut Criterion) {
    let keypair = LumenKeypair::from_seed(&[0x11; 32]);
    let message = [0xAB; 140];
    let signature = keypair.sign(&message);

    c.bench_function("ed25519/generate_keypair", |b| {
        b.iter(LumenKeypair::generate)
    });
    c.bench_function("ed25519/sign_message", |b| {
        b.iter(|| keypair.sign(black_box(&message)))
    });
    c.bench_function("ed25519/verify_message", |b| {
        b.iter(|| keypair.public_key().verify(black_box(&message), &signature))
    });
}

fn bench_address(c: &mut Criterion) {
    let public_key = LumenKeypair::from_seed(&[0x42; 32]).public_key();
    let address = Address::from_public_key(&public_key, NetworkType::Testnet);
    let encoded = address.encode();

    c.bench_function("address/from_public_key", |b| {
        b.iter(|| Address::from_public_key(black_box(&public_key), NetworkType::Testnet))
    });
    c.bench_function("address/encode", |b| b.iter(|| black_box(&address).encode()));
    c.bench_function("address/from_encoded", |b| {
        b.iter(|| Address::from_encoded(black_box(&encoded)).unwrap())
    });
}

fn bench_transaction(c: &mut Criterion) {
    let (keypair, generation_hash, tx) = fixtures();
    let signed = sign_transaction(&tx, &keypair, &generation_hash).unwrap();
    let payload = signed.payload_bytes().unwrap();

    c.bench_function("transaction/serialize_transfer", |b| {
        b.iter(|| black_box(&tx).to_bytes().unwrap())
    });
    c.bench_function("transaction/sign_transfer", |b| {
        b.iter(|| sign_transaction(black_box(&tx), &keypair, &generation_hash).unwrap())
    });
    c.bench_function("transaction/parse_transfer", |b| {
        b.iter(|| Transaction::from_bytes(black_box(&payload)).unwrap())
    });
}

criterion_group!(benches, bench_keys, bench_address, bench_transaction);
criterion_main!(benches);
