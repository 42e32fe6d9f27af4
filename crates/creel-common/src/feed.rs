//! Deterministic chunk addresses for sequential feed updates.
//!
//! Derivation is two staged. The update identifier hashes the topic with the
//! index, so a party holding only the identifier can verify an update belongs
//! to a topic without learning the owner binding. The final address hashes
//! the owner with that identifier, so reproducing it takes both halves.

use crate::crypto::keccak256;
use crate::error::IndexError;
use crate::types::feed::{FeedIndex, Owner, Topic};
use crate::types::reference::Digest;

/// Identifier of one update position: keccak-256(topic ‖ index bytes).
pub fn feed_update_identifier(topic: &Topic, index: &FeedIndex) -> Result<Digest, IndexError> {
    let index_bytes = index.to_index_bytes()?;
    Ok(keccak256(&[topic.as_bytes(), &index_bytes]))
}

/// Chunk address of one feed update: keccak-256(owner ‖ update identifier).
///
/// The same (owner, topic, index) triple always yields the same address;
/// distinct indices yield distinct addresses with overwhelming probability.
pub fn feed_update_address(
    owner: &Owner,
    topic: &Topic,
    index: impl Into<FeedIndex>,
) -> Result<Digest, IndexError> {
    let identifier = feed_update_identifier(topic, &index.into())?;
    Ok(keccak256(&[owner.as_bytes(), identifier.as_bytes()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn owner() -> Owner {
        Owner::new([0u8; 20])
    }

    fn topic() -> Topic {
        Topic::new([0u8; 32])
    }

    #[test]
    fn derivation_is_deterministic() {
        let first = feed_update_address(&owner(), &topic(), 7u64).unwrap();
        let second = feed_update_address(&owner(), &topic(), 7u64).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn all_index_shapes_agree() {
        let from_number = feed_update_address(&owner(), &topic(), 5u64).unwrap();
        let from_string = feed_update_address(&owner(), &topic(), "5").unwrap();
        let from_bytes = feed_update_address(&owner(), &topic(), 5u64.to_be_bytes()).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, from_bytes);
    }

    #[test]
    fn addresses_are_distinct_across_indices() {
        let addresses: HashSet<_> = (0u64..=50)
            .map(|i| feed_update_address(&owner(), &topic(), i).unwrap())
            .collect();
        assert_eq!(addresses.len(), 51);
    }

    #[test]
    fn owner_and_topic_both_bind_the_address() {
        let base = feed_update_address(&owner(), &topic(), 0u64).unwrap();
        let other_owner = feed_update_address(&Owner::new([1u8; 20]), &topic(), 0u64).unwrap();
        let other_topic = feed_update_address(&owner(), &Topic::new([1u8; 32]), 0u64).unwrap();
        assert_ne!(base, other_owner);
        assert_ne!(base, other_topic);
    }

    #[test]
    fn address_composes_from_identifier() {
        let index = FeedIndex::from(3u64);
        let identifier = feed_update_identifier(&topic(), &index).unwrap();
        let address = feed_update_address(&owner(), &topic(), index).unwrap();
        assert_eq!(
            address,
            keccak256(&[owner().as_bytes(), identifier.as_bytes()])
        );
    }

    #[test]
    fn bad_decimal_index_fails_before_hashing() {
        assert!(feed_update_address(&owner(), &topic(), "twelve").is_err());
    }
}
