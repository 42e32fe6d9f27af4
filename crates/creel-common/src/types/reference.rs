//! Chunk references: the 32-byte digest and its 64-character hex form.

use crate::error::{HexError, ReferenceError};
use crate::hex::{hex_to_array, is_hex_string};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use smol_str::SmolStr;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Character length of a plain (unencrypted) reference.
pub const REFERENCE_HEX_LENGTH: usize = 64;

/// Character length of an encrypted reference (digest plus decryption key).
pub const ENCRYPTED_REFERENCE_HEX_LENGTH: usize = 128;

/// A 32-byte keccak-256 digest addressing a chunk's content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Digest length in bytes.
    pub const LENGTH: usize = 32;

    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses a digest from its 64-character hex form.
    pub fn from_hex(value: &str) -> Result<Self, HexError> {
        Ok(Self(hex_to_array(value, "digest")?))
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The hex wire form of this digest.
    pub fn to_reference(&self) -> Reference {
        Reference(SmolStr::from(hex::encode(self.0)))
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = SmolStr::deserialize(deserializer)?;
        Self::from_hex(value.as_str()).map_err(D::Error::custom)
    }
}

/// A validated chunk reference: exactly 64 lowercase hex characters.
///
/// This is the sole human-facing and wire-facing reference format. Uppercase
/// hex is accepted on input and normalized; 128-character encrypted
/// references are rejected as unsupported in this core.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Reference(SmolStr);

impl Reference {
    /// Parses and validates a reference from its hex form.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ReferenceError> {
        let value = value.as_ref();
        if !is_hex_string(value, None) {
            return Err(ReferenceError::NotHex {
                value: value.to_string(),
            });
        }
        if value.len() == ENCRYPTED_REFERENCE_HEX_LENGTH {
            return Err(ReferenceError::Encrypted {
                value: value.to_string(),
            });
        }
        if value.len() != REFERENCE_HEX_LENGTH {
            return Err(ReferenceError::Length {
                value: value.to_string(),
            });
        }
        if value.bytes().any(|b| b.is_ascii_uppercase()) {
            Ok(Self(SmolStr::from(value.to_ascii_lowercase())))
        } else {
            Ok(Self(SmolStr::from(value)))
        }
    }

    /// The hex form, always lowercase.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The binary form of this reference.
    pub fn to_digest(&self) -> Digest {
        // invariant: always exactly 64 hex characters
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(self.0.as_str(), &mut bytes)
            .expect("reference is always 64 hex characters");
        Digest(bytes)
    }
}

impl From<Digest> for Reference {
    fn from(digest: Digest) -> Self {
        digest.to_reference()
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = SmolStr::deserialize(deserializer)?;
        Self::new(&value).map_err(D::Error::custom)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Reference {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = "1a9ad03aa993d5ee550daec2e4df4829fd99cc23993ea7d3e0797dd33253fd68";

    #[test]
    fn accepts_every_valid_plain_reference() {
        let r = Reference::new(PLAIN).unwrap();
        assert_eq!(r.as_str(), PLAIN);
        assert_eq!(Reference::new("0".repeat(64)).unwrap().as_str(), "0".repeat(64));
    }

    #[test]
    fn normalizes_uppercase_input() {
        let r = Reference::new(PLAIN.to_ascii_uppercase()).unwrap();
        assert_eq!(r.as_str(), PLAIN);
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert!(matches!(
            Reference::new("abcd").unwrap_err(),
            ReferenceError::Length { .. }
        ));
        assert!(matches!(
            Reference::new("a".repeat(63)).unwrap_err(),
            ReferenceError::Length { .. }
        ));
        assert!(matches!(
            Reference::new("a".repeat(65)).unwrap_err(),
            ReferenceError::Length { .. }
        ));
    }

    #[test]
    fn rejects_encrypted_references_with_dedicated_message() {
        let err = Reference::new("b".repeat(128)).unwrap_err();
        assert!(matches!(err, ReferenceError::Encrypted { .. }));
        assert!(err.to_string().contains("encrypted references are not supported"));
    }

    #[test]
    fn rejects_non_hex() {
        assert!(matches!(
            Reference::new("g".repeat(64)).unwrap_err(),
            ReferenceError::NotHex { .. }
        ));
    }

    #[test]
    fn digest_roundtrip() {
        let reference = Reference::new(PLAIN).unwrap();
        let digest = reference.to_digest();
        assert_eq!(digest.to_reference(), reference);
        assert_eq!(digest.to_string(), PLAIN);
        assert_eq!(Digest::from_hex(PLAIN).unwrap(), digest);
    }

    #[test]
    fn serde_as_hex_string() {
        let reference = Reference::new(PLAIN).unwrap();
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, format!("\"{PLAIN}\""));
        let parsed: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reference);

        let digest: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(digest, reference.to_digest());
    }

    #[test]
    fn serde_rejects_invalid_reference() {
        assert!(serde_json::from_str::<Reference>("\"abcd\"").is_err());
    }
}
