//! Cluster reference <-> CID conversion.
//!
//! A cluster CID is a standard CIDv1: the reference's digest wrapped in a
//! keccak-256 multihash, under a codec that optionally tags what the
//! reference points to. Decoding comes in two shapes: the permissive
//! [`DecodedCid`], which never fails on a foreign codec (the type is simply
//! absent), and the strict [`decode_feed_cid`] / [`decode_manifest_cid`]
//! entry points for callers that already know what the CID must be.

use crate::crypto::KECCAK_256_CODEC;
use crate::error::CidError;
use crate::types::reference::{Digest, Reference};
use multihash::Multihash;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use cid::Cid as ContentId;

/// Generic cluster namespace codec, not tied to a reference type.
pub const CLUSTER_NS_CODEC: u64 = 0xe4;

/// Codec tagging a manifest reference.
pub const CLUSTER_MANIFEST_CODEC: u64 = 0xfa;

/// Codec tagging a sequential feed reference.
pub const CLUSTER_FEED_CODEC: u64 = 0xfb;

/// Multibase used for the textual form of cluster CIDs.
pub const CLUSTER_CID_BASE: multibase::Base = multibase::Base::Base32Lower;

/// The semantic kind of content a reference points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceType {
    /// A sequential feed update.
    Feed,
    /// A manifest.
    Manifest,
}

impl ReferenceType {
    /// The reserved codec for this reference type.
    pub fn codec(&self) -> u64 {
        match self {
            ReferenceType::Feed => CLUSTER_FEED_CODEC,
            ReferenceType::Manifest => CLUSTER_MANIFEST_CODEC,
        }
    }

    /// Maps a codec back to its reference type, if it has one.
    pub fn from_codec(codec: u64) -> Option<Self> {
        match codec {
            CLUSTER_FEED_CODEC => Some(ReferenceType::Feed),
            CLUSTER_MANIFEST_CODEC => Some(ReferenceType::Manifest),
            _ => None,
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceType::Feed => f.write_str("Feed"),
            ReferenceType::Manifest => f.write_str("Manifest"),
        }
    }
}

/// Encodes a reference into a CIDv1 carrying the codec for `reference_type`.
pub fn encode_reference(reference: &Reference, reference_type: ReferenceType) -> ContentId {
    let digest = reference.to_digest();
    let hash = Multihash::<64>::wrap(KECCAK_256_CODEC, digest.as_bytes())
        .expect("a 32-byte digest always fits a 64-byte multihash");
    ContentId::new_v1(reference_type.codec(), hash)
}

/// Encodes a reference as a feed CID.
pub fn encode_feed_reference(reference: &Reference) -> ContentId {
    encode_reference(reference, ReferenceType::Feed)
}

/// Encodes a reference as a manifest CID.
pub fn encode_manifest_reference(reference: &Reference) -> ContentId {
    encode_reference(reference, ReferenceType::Manifest)
}

/// Renders a CID in the cluster's canonical textual form (base32lower).
pub fn cid_to_string(cid: &ContentId) -> Result<String, CidError> {
    Ok(cid.to_string_of_base(CLUSTER_CID_BASE)?)
}

/// Result of permissively decoding a CID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecodedCid {
    /// Hex-encoded reference extracted from the multihash digest.
    pub reference: Reference,
    /// The reference type, when the CID carried a cluster codec; absent for
    /// any other codec.
    pub reference_type: Option<ReferenceType>,
    codec: u64,
}

impl DecodedCid {
    /// Decodes a pre-parsed CID.
    ///
    /// Never fails on an unrecognized codec; fails only when the multihash
    /// digest is not a 32-byte cluster digest.
    pub fn from_cid(cid: &ContentId) -> Result<Self, CidError> {
        let digest_bytes = cid.hash().digest();
        let len = digest_bytes.len();
        if len != Digest::LENGTH {
            return Err(CidError::DigestLength { len });
        }
        let mut bytes = [0u8; Digest::LENGTH];
        bytes.copy_from_slice(digest_bytes);
        Ok(Self {
            reference: Digest::new(bytes).to_reference(),
            reference_type: ReferenceType::from_codec(cid.codec()),
            codec: cid.codec(),
        })
    }

    /// Parses a textual (multibase) CID and decodes it.
    pub fn parse(value: &str) -> Result<Self, CidError> {
        let cid = ContentId::try_from(value)?;
        Self::from_cid(&cid)
    }

    /// The codec the CID carried, cluster-reserved or not.
    pub fn codec(&self) -> u64 {
        self.codec
    }

    /// Commits this decode to an expected reference type.
    pub fn expect_type(self, expected: ReferenceType) -> Result<Reference, CidError> {
        if self.reference_type == Some(expected) {
            Ok(self.reference)
        } else {
            Err(CidError::UnexpectedCodec {
                expected,
                found: self.codec,
            })
        }
    }
}

impl FromStr for DecodedCid {
    type Err = CidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Strictly decodes a textual CID that must carry the feed codec.
pub fn decode_feed_cid(value: &str) -> Result<Reference, CidError> {
    DecodedCid::parse(value)?.expect_type(ReferenceType::Feed)
}

/// Strictly decodes a textual CID that must carry the manifest codec.
pub fn decode_manifest_cid(value: &str) -> Result<Reference, CidError> {
    DecodedCid::parse(value)?.expect_type(ReferenceType::Manifest)
}
