//! Feed identities: the publishing owner, the topic partition and the
//! position index of an update.

use crate::error::{HexError, IndexError};
use crate::hex::hex_to_array;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;

/// Byte length of an owner account address.
pub const OWNER_BYTES_LENGTH: usize = 20;

/// Byte length of a feed topic.
pub const TOPIC_BYTES_LENGTH: usize = 32;

/// Character length of a feed topic's hex form.
pub const TOPIC_HEX_LENGTH: usize = 64;

/// Character length of a feed index identifier's hex form.
pub const FEED_INDEX_HEX_LENGTH: usize = 16;

/// The 20-byte account address of a feed's publisher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Owner([u8; OWNER_BYTES_LENGTH]);

impl Owner {
    /// Wraps raw address bytes.
    pub const fn new(bytes: [u8; OWNER_BYTES_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses an owner address from 40 hex characters, with or without a
    /// leading `0x`.
    pub fn from_hex(value: &str) -> Result<Self, HexError> {
        let value = value.strip_prefix("0x").unwrap_or(value);
        Ok(Self(hex_to_array(value, "owner")?))
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; OWNER_BYTES_LENGTH] {
        &self.0
    }
}

impl From<[u8; OWNER_BYTES_LENGTH]> for Owner {
    fn from(bytes: [u8; OWNER_BYTES_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Owner {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for Owner {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = SmolStr::deserialize(deserializer)?;
        Self::from_hex(value.as_str()).map_err(D::Error::custom)
    }
}

/// A 32-byte value partitioning the feed address space of one owner.
///
/// Distinct topics under the same owner are independent feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Topic([u8; TOPIC_BYTES_LENGTH]);

impl Topic {
    /// Wraps raw topic bytes.
    pub const fn new(bytes: [u8; TOPIC_BYTES_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a topic from its 64-character hex form.
    pub fn from_hex(value: &str) -> Result<Self, HexError> {
        Ok(Self(hex_to_array(value, "topic")?))
    }

    /// The raw topic bytes.
    pub fn as_bytes(&self) -> &[u8; TOPIC_BYTES_LENGTH] {
        &self.0
    }
}

impl From<[u8; TOPIC_BYTES_LENGTH]> for Topic {
    fn from(bytes: [u8; TOPIC_BYTES_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Topic {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl Serialize for Topic {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Topic {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = SmolStr::deserialize(deserializer)?;
        Self::from_hex(value.as_str()).map_err(D::Error::custom)
    }
}

/// Position of an update in a feed's append-only sequence.
///
/// Indices start at zero and increment by one per published update. Callers
/// hold them in three equivalent shapes; all normalize to the same `u64`
/// before use.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FeedIndex {
    /// Canonical 8-byte big-endian encoding.
    Bytes([u8; 8]),
    /// Decimal string, parsed on normalization.
    Decimal(SmolStr),
    /// Native integer.
    Number(u64),
}

impl FeedIndex {
    /// Normalizes to the underlying unsigned integer.
    pub fn to_u64(&self) -> Result<u64, IndexError> {
        match self {
            FeedIndex::Bytes(bytes) => Ok(u64::from_be_bytes(*bytes)),
            FeedIndex::Decimal(value) => value.parse().map_err(|_| IndexError::Decimal {
                value: value.to_string(),
            }),
            FeedIndex::Number(n) => Ok(*n),
        }
    }

    /// The canonical 8-byte big-endian identifier bytes for this index.
    pub fn to_index_bytes(&self) -> Result<[u8; 8], IndexError> {
        Ok(self.to_u64()?.to_be_bytes())
    }

    /// The 16-character hex form of the index identifier.
    pub fn to_hex(&self) -> Result<String, IndexError> {
        Ok(hex::encode(self.to_index_bytes()?))
    }
}

impl From<u64> for FeedIndex {
    fn from(n: u64) -> Self {
        FeedIndex::Number(n)
    }
}

impl From<u32> for FeedIndex {
    fn from(n: u32) -> Self {
        FeedIndex::Number(n as u64)
    }
}

impl From<[u8; 8]> for FeedIndex {
    fn from(bytes: [u8; 8]) -> Self {
        FeedIndex::Bytes(bytes)
    }
}

impl From<&str> for FeedIndex {
    fn from(value: &str) -> Self {
        FeedIndex::Decimal(SmolStr::from(value))
    }
}

impl From<String> for FeedIndex {
    fn from(value: String) -> Self {
        FeedIndex::Decimal(SmolStr::from(value))
    }
}

impl fmt::Display for FeedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedIndex::Bytes(bytes) => write!(f, "{}", u64::from_be_bytes(*bytes)),
            FeedIndex::Decimal(value) => f.write_str(value),
            FeedIndex::Number(n) => write!(f, "{n}"),
        }
    }
}
