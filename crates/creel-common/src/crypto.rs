//! Keccak-256, the cluster's chunk addressing primitive.

use crate::types::reference::Digest;
use sha3::{Digest as _, Keccak256};

/// Multicodec identifier for keccak-256, used inside every cluster CID's
/// multihash.
///
/// <https://github.com/multiformats/multicodec/blob/master/table.csv>
pub const KECCAK_256_CODEC: u64 = 0x1b;

/// Hashes the concatenation of `parts` with keccak-256.
///
/// Substituting any other hash function is a compatibility break with the
/// cluster's addressing scheme.
pub fn keccak256(parts: &[&[u8]]) -> Digest {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    Digest::new(hasher.finalize().into())
}
