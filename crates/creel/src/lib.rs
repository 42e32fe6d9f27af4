//! Client-side library for the cluster content-addressed storage network.
//!
//! Re-exports the reference core from [`creel_common`] and adds the network
//! facing pieces: the [`ChunkProbe`] capability and the sequential feed
//! retrievability verifier.

#![warn(missing_docs)]

pub use creel_common as common;
pub use creel_common::{
    DecodedCid, Digest, FeedIndex, Owner, Reference, ReferenceType, Topic, feed_update_address,
    feed_update_identifier,
};

pub mod probe;
pub mod retrievable;

pub use probe::{ChunkProbe, ProbeFailure};
#[cfg(feature = "reqwest-client")]
pub use probe::{NodeProbe, ProbeError};
pub use retrievable::{RetrievalOptions, are_all_sequential_feed_updates_retrievable};
