//! Network identity and time.
//!
//! Three networks share one wire format and are told apart by a single
//! tag byte that appears in every transaction header and as the first
//! byte of every address. Each network also carries its own generation
//! hash (mixed into signing bytes, so signatures never replay across
//! networks) and its own epoch from which deadlines are measured.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError, Decode, Entity};
use crate::types::hash256::Hash256;

/// Which LUMEN network a transaction or address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
    /// Local development networks.
    Devnet,
}

impl NetworkType {
    /// The single identifying byte used on the wire and in addresses.
    pub fn tag(self) -> u8 {
        match self {
            NetworkType::Mainnet => 0x4C,
            NetworkType::Testnet => 0x54,
            NetworkType::Devnet => 0x44,
        }
    }

    /// Inverse of [`NetworkType::tag`].
    pub fn from_tag(tag: u8) -> Result<Self, CodecError> {
        match tag {
            0x4C => Ok(NetworkType::Mainnet),
            0x54 => Ok(NetworkType::Testnet),
            0x44 => Ok(NetworkType::Devnet),
            other => Err(CodecError::UnknownVariant {
                field: "network",
                value: other as u64,
            }),
        }
    }

    /// Milliseconds from the Unix epoch to this network's own epoch.
    /// Deadlines on the wire count from here, not from 1970.
    pub fn epoch_adjustment_ms(self) -> u64 {
        match self {
            // 2025-01-01T00:00:00Z
            NetworkType::Mainnet => 1_735_689_600_000,
            // 2024-10-01T00:00:00Z
            NetworkType::Testnet => 1_727_740_800_000,
            // 2024-06-20T00:00:00Z
            NetworkType::Devnet => 1_718_841_600_000,
        }
    }
}

impl Entity for NetworkType {
    fn size(&self) -> usize {
        1
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u8(self.tag());
    }
}

impl Decode for NetworkType {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Self::from_tag(r.read_u8()?)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkType::Mainnet => "mainnet",
            NetworkType::Testnet => "testnet",
            NetworkType::Devnet => "devnet",
        };
        write!(f, "{name}")
    }
}

/// The 32-byte hash that uniquely identifies one network instance.
///
/// Mixed into every signing payload and every transaction hash, which is
/// what makes a testnet signature worthless on mainnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationHash(pub Hash256);

impl GenerationHash {
    /// Borrows the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Parses from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        Ok(Self(Hash256::from_hex(s)?))
    }
}

impl fmt::Display for GenerationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transaction deadline: milliseconds since the network epoch, 8 bytes
/// little-endian on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Deadline(pub u64);

impl Deadline {
    /// Byte width on the wire.
    pub const SIZE: usize = 8;

    /// Deadline at an absolute instant, measured against `network`'s epoch.
    /// Instants before the epoch saturate to zero.
    pub fn at(network: NetworkType, instant: DateTime<Utc>) -> Self {
        let unix_ms = instant.timestamp_millis().max(0) as u64;
        Self(unix_ms.saturating_sub(network.epoch_adjustment_ms()))
    }

    /// Deadline a relative duration from now.
    pub fn from_now(network: NetworkType, ahead: Duration) -> Self {
        Self::at(network, Utc::now() + ahead)
    }

    /// Raw epoch-relative milliseconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Entity for Deadline {
    fn size(&self) -> usize {
        Self::SIZE
    }

    fn write(&self, w: &mut ByteWriter) {
        w.write_u64(self.0);
    }
}

impl Decode for Deadline {
    fn read(r: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok(Self(r.read_u64()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tags_roundtrip() {
        for network in [
            NetworkType::Mainnet,
            NetworkType::Testnet,
            NetworkType::Devnet,
        ] {
            assert_eq!(NetworkType::from_tag(network.tag()).unwrap(), network);
        }
    }

    #[test]
    fn unknown_tag_rejected() {
        let err = NetworkType::from_tag(0x99).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownVariant {
                field: "network",
                value: 0x99
            }
        );
    }

    #[test]
    fn wire_form_is_single_tag_byte() {
        let bytes = NetworkType::Testnet.to_bytes().unwrap();
        assert_eq!(bytes, vec![0x54]);
        assert_eq!(
            <NetworkType as Decode>::from_bytes(&bytes).unwrap(),
            NetworkType::Testnet
        );
    }

    #[test]
    fn deadline_measures_from_network_epoch() {
        // 2025-01-08T01:00:00Z on testnet (epoch 2024-10-01T00:00:00Z).
        let instant = Utc.with_ymd_and_hms(2025, 1, 8, 1, 0, 0).unwrap();
        let deadline = Deadline::at(NetworkType::Testnet, instant);
        let expected =
            instant.timestamp_millis() as u64 - NetworkType::Testnet.epoch_adjustment_ms();
        assert_eq!(deadline.value(), expected);
    }

    #[test]
    fn deadline_before_epoch_saturates() {
        let ancient = Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Deadline::at(NetworkType::Mainnet, ancient).value(), 0);
    }

    #[test]
    fn deadline_from_now_is_in_the_future() {
        let two_hours = Deadline::from_now(NetworkType::Testnet, Duration::hours(2));
        let now = Deadline::from_now(NetworkType::Testnet, Duration::zero());
        assert!(two_hours > now);
    }

    #[test]
    fn generation_hash_hex_roundtrip() {
        let hash =
            GenerationHash::from_hex("87f7e2efaf212ec1318ccce5d82f478539e8c2211407f18750bdd07dadc6ad73")
                .unwrap();
        assert_eq!(
            hash.to_string(),
            "87f7e2efaf212ec1318ccce5d82f478539e8c2211407f18750bdd07dadc6ad73"
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(NetworkType::Mainnet.to_string(), "mainnet");
        assert_eq!(NetworkType::Testnet.to_string(), "testnet");
        assert_eq!(NetworkType::Devnet.to_string(), "devnet");
    }
}
