use serde::Serialize;
use thiserror::Error;
use tubelens_core::FetchError;

/// The statistic was requested over an empty video set.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("video set is empty")]
pub struct EmptySetError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("channel '{handle}' has no uploads with recorded views")]
    EmptyVideoSet { handle: String },
}

/// Coarse classification of a per-channel failure, as recorded in a batch
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    ChannelNotFound,
    EmptyVideoSet,
    RateLimited,
    TransportUnavailable,
    Upstream,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::ChannelNotFound => "ChannelNotFound",
            FailureKind::EmptyVideoSet => "EmptyVideoSet",
            FailureKind::RateLimited => "RateLimited",
            FailureKind::TransportUnavailable => "TransportUnavailable",
            FailureKind::Upstream => "Upstream",
        };
        f.write_str(name)
    }
}

impl AnalysisError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisError::Fetch(FetchError::ChannelNotFound { .. }) => FailureKind::ChannelNotFound,
            AnalysisError::Fetch(FetchError::RateLimited { .. }) => FailureKind::RateLimited,
            AnalysisError::Fetch(FetchError::TransportUnavailable(_)) => {
                FailureKind::TransportUnavailable
            }
            AnalysisError::Fetch(FetchError::Upstream(_)) => FailureKind::Upstream,
            AnalysisError::EmptyVideoSet { .. } => FailureKind::EmptyVideoSet,
        }
    }
}
