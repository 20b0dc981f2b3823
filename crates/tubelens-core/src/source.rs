//! The data-source boundary the analysis engine pulls channel data through.

use thiserror::Error;

use crate::video::ChannelSnapshot;

/// Failure kinds a data source may report. The engine only reacts to the
/// kind; network access and quota negotiation stay on the source's side.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("no channel matches handle '{handle}'")]
    ChannelNotFound { handle: String },

    #[error("rate limited by upstream: {reason}")]
    RateLimited { reason: String },

    #[error("transport unavailable: {0}")]
    TransportUnavailable(String),

    #[error("upstream error: {0}")]
    Upstream(String),
}

impl FetchError {
    /// Only quota/rate failures are worth retrying.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }
}

/// Supplies channel context and raw upload records for a handle.
#[async_trait::async_trait]
pub trait ChannelSource: Send + Sync {
    /// Fetch the channel summary and its recent uploads.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing why the channel could not be
    /// retrieved.
    async fn fetch_channel(&self, handle: &str) -> Result<ChannelSnapshot, FetchError>;
}
