//! Chunk retrievability probing.
//!
//! The verifier does not talk to the network itself; it consumes a
//! [`ChunkProbe`] capability supplied by the transport layer. Retry and
//! backoff policy belong to that layer, never to the probe consumer.

use creel_common::Reference;
use std::future::Future;
use std::sync::Arc;

/// Classification hook for probe failures.
///
/// The verifier treats "the chunk is not there" as a plain `false`, not a
/// fatal error, so probe error types must be able to say which kind of
/// failure they are.
pub trait ProbeFailure: std::error::Error + Send + Sync + 'static {
    /// True when the failure means the chunk does not exist (a 404 from the
    /// node), as opposed to transport trouble or an unexpected status.
    fn is_not_found(&self) -> bool;
}

/// Capability to check whether a chunk currently exists on the network.
#[trait_variant::make(Send)]
pub trait ChunkProbe {
    /// Error type returned by the probe.
    type Error: ProbeFailure;

    /// Performs a direct fetch of the chunk at `reference` and reports
    /// whether it exists. A not-found response maps to `Ok(false)`.
    fn probe_chunk(
        &self,
        reference: &Reference,
    ) -> impl Future<Output = Result<bool, Self::Error>>;
}

impl<T: ChunkProbe + Sync> ChunkProbe for Arc<T> {
    type Error = T::Error;

    fn probe_chunk(
        &self,
        reference: &Reference,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        self.as_ref().probe_chunk(reference)
    }
}

/// Failure probing a chunk against a cluster node.
#[cfg(feature = "reqwest-client")]
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ProbeError {
    /// The node answered 404 for the chunk.
    #[error("chunk {reference} not found on node")]
    NotFound {
        /// The probed reference.
        reference: Reference,
    },

    /// The node answered with an unexpected status.
    #[error("probing chunk {reference} failed with status {status}")]
    Status {
        /// The probed reference.
        reference: Reference,
        /// The status the node answered with.
        status: reqwest::StatusCode,
    },

    /// The request never produced a response.
    #[error("transport error probing chunk {reference}: {source}")]
    Transport {
        /// The probed reference.
        reference: Reference,
        /// Underlying transport failure.
        source: reqwest::Error,
    },

    /// The node base URL and reference did not combine into a valid URL.
    #[error("invalid probe url for chunk {reference}: {source}")]
    Url {
        /// The probed reference.
        reference: Reference,
        /// Underlying URL failure.
        source: url::ParseError,
    },
}

#[cfg(feature = "reqwest-client")]
impl ProbeFailure for ProbeError {
    fn is_not_found(&self) -> bool {
        matches!(self, ProbeError::NotFound { .. })
    }
}

/// Probe backed by a cluster node's `chunks/{reference}` endpoint.
#[cfg(feature = "reqwest-client")]
#[derive(Debug, Clone)]
pub struct NodeProbe {
    client: reqwest::Client,
    base: url::Url,
}

#[cfg(feature = "reqwest-client")]
impl NodeProbe {
    /// Creates a probe against the node at `base` with a fresh HTTP client.
    pub fn new(base: url::Url) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Creates a probe reusing an existing HTTP client (and its connection
    /// pool, proxy and TLS configuration).
    pub fn with_client(client: reqwest::Client, base: url::Url) -> Self {
        Self { client, base }
    }

    fn chunk_url(&self, reference: &Reference) -> Result<url::Url, ProbeError> {
        self.base
            .join(&format!("chunks/{reference}"))
            .map_err(|source| ProbeError::Url {
                reference: reference.clone(),
                source,
            })
    }
}

#[cfg(feature = "reqwest-client")]
impl ChunkProbe for NodeProbe {
    type Error = ProbeError;

    async fn probe_chunk(&self, reference: &Reference) -> Result<bool, ProbeError> {
        let url = self.chunk_url(reference)?;
        tracing::trace!(%reference, %url, "probing chunk");
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| ProbeError::Transport {
                    reference: reference.clone(),
                    source,
                })?;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(ProbeError::Status {
                reference: reference.clone(),
                status,
            })
        }
    }
}
