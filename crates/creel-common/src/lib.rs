//! Core types for the creel cluster client.
//!
//! The cluster stores immutable, fixed-size chunks addressed by keccak-256
//! digest. This crate holds everything needed to talk about those addresses
//! without touching the network: the hex codec, the validated [`Reference`]
//! and [`Digest`] types, CID encoding/decoding with the cluster codec table,
//! and deterministic address derivation for sequential feeds.

#![warn(missing_docs)]

pub mod cid;
pub mod crypto;
pub mod error;
pub mod feed;
pub mod hex;
pub mod types;

pub use cid::{DecodedCid, ReferenceType};
pub use feed::{feed_update_address, feed_update_identifier};
pub use types::feed::{FeedIndex, Owner, Topic};
pub use types::reference::{Digest, Reference};
