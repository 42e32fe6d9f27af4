//! Verifying that every update of a sequential feed is still retrievable.
//!
//! The node's stewardship check only validates manifest references, not raw
//! feed update chunks, so the only way to establish that a feed's history is
//! intact is to derive the address of every update in `[0, index]` and fetch
//! each chunk directly.

use crate::probe::{ChunkProbe, ProbeFailure};
use creel_common::error::IndexError;
use creel_common::{FeedIndex, Owner, Reference, Topic, feed_update_address};
use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

/// Options for a retrievability check.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetrievalOptions {
    /// Cap on concurrent probes. `None` probes the whole range at once,
    /// which for large feeds means a correspondingly large fan-out.
    pub concurrency: Option<usize>,
}

/// Failure of a retrievability check.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RetrievalError<E: ProbeFailure> {
    /// The given feed index could not be normalized.
    #[error(transparent)]
    Index(#[from] IndexError),

    /// A probe failed with something other than not-found.
    #[error("probe failed: {0}")]
    Probe(E),
}

/// Checks that every update of the feed `(owner, topic)` up to and including
/// `index` is independently retrievable.
///
/// Probes run concurrently; a not-found outcome makes that index count as
/// `false`, while any other probe failure resolves the whole call with that
/// error and drops the remaining in-flight probes. Cancellation is dropping
/// the returned future (wrap it in a timeout if needed); no partial verdict
/// is ever returned.
pub async fn are_all_sequential_feed_updates_retrievable<P: ChunkProbe + Sync>(
    probe: &P,
    owner: &Owner,
    topic: &Topic,
    index: impl Into<FeedIndex>,
    options: RetrievalOptions,
) -> Result<bool, RetrievalError<P::Error>> {
    let top = index.into().to_u64()?;
    let references = all_sequence_update_references(owner, topic, top)?;
    debug!(%owner, %topic, top, "probing {} feed update chunks", references.len());

    let checks = references
        .into_iter()
        .map(|reference| probe_one(probe, reference));

    let results = match options.concurrency {
        Some(cap) if cap > 0 => {
            stream::iter(checks)
                .buffer_unordered(cap)
                .try_collect::<Vec<bool>>()
                .await?
        }
        _ => future::try_join_all(checks).await?,
    };

    Ok(results.into_iter().all(|retrievable| retrievable))
}

/// Derives the chunk reference of every update in `[0, top]`.
fn all_sequence_update_references(
    owner: &Owner,
    topic: &Topic,
    top: u64,
) -> Result<Vec<Reference>, IndexError> {
    (0..=top)
        .map(|i| Ok(feed_update_address(owner, topic, i)?.to_reference()))
        .collect()
}

async fn probe_one<P: ChunkProbe>(
    probe: &P,
    reference: Reference,
) -> Result<bool, RetrievalError<P::Error>> {
    match probe.probe_chunk(&reference).await {
        Ok(found) => Ok(found),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(RetrievalError::Probe(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, thiserror::Error)]
    enum StubError {
        #[error("chunk not found")]
        NotFound,
        #[error("connection reset")]
        Transport,
    }

    impl ProbeFailure for StubError {
        fn is_not_found(&self) -> bool {
            matches!(self, StubError::NotFound)
        }
    }

    #[derive(Clone, Copy)]
    enum Script {
        Found,
        Missing,
        NotFoundFailure,
        TransportFailure,
    }

    struct StubProbe(HashMap<Reference, Script>);

    impl StubProbe {
        /// Scripts indices 0..scripts.len() of the zero owner/topic feed.
        fn for_indices(scripts: &[Script]) -> Self {
            let map = scripts
                .iter()
                .enumerate()
                .map(|(i, script)| (update_reference(i as u64), *script))
                .collect();
            Self(map)
        }
    }

    impl ChunkProbe for StubProbe {
        type Error = StubError;

        async fn probe_chunk(&self, reference: &Reference) -> Result<bool, StubError> {
            match self.0.get(reference).copied().unwrap_or(Script::Missing) {
                Script::Found => Ok(true),
                Script::Missing => Ok(false),
                Script::NotFoundFailure => Err(StubError::NotFound),
                Script::TransportFailure => Err(StubError::Transport),
            }
        }
    }

    fn owner() -> Owner {
        Owner::new([0u8; 20])
    }

    fn topic() -> Topic {
        Topic::new([0u8; 32])
    }

    fn update_reference(index: u64) -> Reference {
        feed_update_address(&owner(), &topic(), index)
            .unwrap()
            .to_reference()
    }

    async fn verify(probe: &StubProbe, index: u64) -> Result<bool, RetrievalError<StubError>> {
        are_all_sequential_feed_updates_retrievable(
            probe,
            &owner(),
            &topic(),
            index,
            RetrievalOptions::default(),
        )
        .await
    }

    #[tokio::test]
    async fn one_missing_update_fails_the_feed() {
        use Script::*;
        let probe = StubProbe::for_indices(&[Found, Found, Found, Missing]);
        assert!(!verify(&probe, 3).await.unwrap());
    }

    #[tokio::test]
    async fn fully_present_feed_passes() {
        use Script::*;
        let probe = StubProbe::for_indices(&[Found, Found, Found, Found]);
        assert!(verify(&probe, 3).await.unwrap());
    }

    #[tokio::test]
    async fn transport_failure_aborts_with_the_error() {
        use Script::*;
        let probe = StubProbe::for_indices(&[Found, Found, TransportFailure, Found]);
        let err = verify(&probe, 3).await.unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::Probe(StubError::Transport)
        ));
    }

    #[tokio::test]
    async fn not_found_failure_translates_to_false() {
        use Script::*;
        let probe = StubProbe::for_indices(&[Found, NotFoundFailure, Found, Found]);
        assert!(!verify(&probe, 3).await.unwrap());
    }

    #[tokio::test]
    async fn string_and_byte_indices_are_accepted() {
        use Script::*;
        let probe = StubProbe::for_indices(&[Found, Found]);
        let ok = are_all_sequential_feed_updates_retrievable(
            &probe,
            &owner(),
            &topic(),
            "1",
            RetrievalOptions::default(),
        )
        .await
        .unwrap();
        assert!(ok);
        let ok = are_all_sequential_feed_updates_retrievable(
            &probe,
            &owner(),
            &topic(),
            1u64.to_be_bytes(),
            RetrievalOptions::default(),
        )
        .await
        .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn invalid_index_fails_before_probing() {
        use Script::*;
        let probe = StubProbe::for_indices(&[Found]);
        let err = are_all_sequential_feed_updates_retrievable(
            &probe,
            &owner(),
            &topic(),
            "three",
            RetrievalOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RetrievalError::Index(_)));
    }

    #[tokio::test]
    async fn capped_concurrency_gives_the_same_verdicts() {
        use Script::*;
        let present = StubProbe::for_indices(&[Found, Found, Found, Found, Found]);
        let gappy = StubProbe::for_indices(&[Found, Missing, Found, Found, Found]);
        let options = RetrievalOptions {
            concurrency: Some(2),
        };
        let ok = are_all_sequential_feed_updates_retrievable(
            &present,
            &owner(),
            &topic(),
            4u64,
            options,
        )
        .await
        .unwrap();
        assert!(ok);
        let ok = are_all_sequential_feed_updates_retrievable(
            &gappy,
            &owner(),
            &topic(),
            4u64,
            options,
        )
        .await
        .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn probing_works_through_arc() {
        use Script::*;
        let probe = std::sync::Arc::new(StubProbe::for_indices(&[Found, Found]));
        let ok = are_all_sequential_feed_updates_retrievable(
            &probe,
            &owner(),
            &topic(),
            1u64,
            RetrievalOptions::default(),
        )
        .await
        .unwrap();
        assert!(ok);
    }
}
