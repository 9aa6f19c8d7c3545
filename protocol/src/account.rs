//! Accounts: a keypair bound to one network.
//!
//! The binding matters because the derived address embeds the network
//! tag and every signature embeds the generation hash; an [`Account`] is
//! the value that keeps those pieces from drifting apart. Key material
//! is always supplied explicitly (or generated on demand); there are no
//! ambient signer globals anywhere in this crate.

use crate::crypto::{KeyError, LumenKeypair, LumenPublicKey};
use crate::transaction::{sign_transaction, SignedTransaction, SigningError, Transaction};
use crate::types::{Address, GenerationHash, NetworkType};

/// An Ed25519 keypair with its network and derived address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    keypair: LumenKeypair,
    network: NetworkType,
    address: Address,
}

impl Account {
    /// Binds an existing keypair to `network`.
    pub fn new(keypair: LumenKeypair, network: NetworkType) -> Self {
        let address = Address::from_public_key(&keypair.public_key(), network);
        Self {
            keypair,
            network,
            address,
        }
    }

    /// Generates a fresh random account on `network`.
    pub fn generate(network: NetworkType) -> Self {
        Self::new(LumenKeypair::generate(), network)
    }

    /// Loads an account from a 64-character hex secret seed.
    pub fn from_hex(secret_hex: &str, network: NetworkType) -> Result<Self, KeyError> {
        Ok(Self::new(LumenKeypair::from_hex(secret_hex)?, network))
    }

    /// The account's public key.
    pub fn public_key(&self) -> LumenPublicKey {
        self.keypair.public_key()
    }

    /// The account's address on its network.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The network this account lives on.
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Borrows the underlying keypair, for cosigning and raw signing.
    pub fn keypair(&self) -> &LumenKeypair {
        &self.keypair
    }

    /// Signs an unsigned transaction with this account's key.
    pub fn sign(
        &self,
        tx: &Transaction,
        generation_hash: &GenerationHash,
    ) -> Result<SignedTransaction, SigningError> {
        sign_transaction(tx, &self.keypair, generation_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_matches_key_and_network() {
        let account = Account::generate(NetworkType::Testnet);
        let expected = Address::from_public_key(&account.public_key(), NetworkType::Testnet);
        assert_eq!(account.address(), expected);
        assert_eq!(account.address().network_tag(), NetworkType::Testnet.tag());
    }

    #[test]
    fn from_hex_is_deterministic() {
        let seed_hex = "11".repeat(32);
        let a = Account::from_hex(&seed_hex, NetworkType::Mainnet).unwrap();
        let b = Account::from_hex(&seed_hex, NetworkType::Mainnet).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn same_key_different_network_different_address() {
        let seed_hex = "22".repeat(32);
        let test = Account::from_hex(&seed_hex, NetworkType::Testnet).unwrap();
        let main = Account::from_hex(&seed_hex, NetworkType::Mainnet).unwrap();
        assert_eq!(test.public_key(), main.public_key());
        assert_ne!(test.address(), main.address());
    }

    #[test]
    fn bad_seed_rejected() {
        assert!(Account::from_hex("nonsense", NetworkType::Devnet).is_err());
    }
}
