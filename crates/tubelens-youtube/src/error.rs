use thiserror::Error;
use tubelens_core::{FetchError, Retriable};

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("quota or rate limit exceeded (HTTP {status}): {reason}")]
    RateLimited { status: u16, reason: String },

    #[error("no channel matches handle '@{handle}'")]
    ChannelNotFound { handle: String },

    #[error("channel '@{handle}' exposes no uploads playlist")]
    MissingUploadsPlaylist { handle: String },

    #[error("unexpected HTTP status {status} from {endpoint}: {message}")]
    UnexpectedStatus {
        status: u16,
        endpoint: String,
        message: String,
    },
}

impl Retriable for YoutubeError {
    fn is_retriable(&self) -> bool {
        matches!(self, YoutubeError::RateLimited { .. })
    }
}

impl From<YoutubeError> for FetchError {
    fn from(err: YoutubeError) -> Self {
        match err {
            YoutubeError::Http(e) => FetchError::TransportUnavailable(e.to_string()),
            YoutubeError::RateLimited { reason, .. } => FetchError::RateLimited { reason },
            YoutubeError::ChannelNotFound { handle } => FetchError::ChannelNotFound { handle },
            other @ (YoutubeError::Deserialize { .. }
            | YoutubeError::MissingUploadsPlaylist { .. }
            | YoutubeError::UnexpectedStatus { .. }) => FetchError::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_maps_to_retriable_fetch_error() {
        let err: FetchError = YoutubeError::RateLimited {
            status: 403,
            reason: "quotaExceeded".to_owned(),
        }
        .into();
        assert!(err.is_retriable());
        assert_eq!(
            err,
            FetchError::RateLimited {
                reason: "quotaExceeded".to_owned()
            }
        );
    }

    #[test]
    fn only_rate_limits_are_retriable() {
        assert!(Retriable::is_retriable(&YoutubeError::RateLimited {
            status: 429,
            reason: "rateLimitExceeded".to_owned(),
        }));
        assert!(!Retriable::is_retriable(&YoutubeError::ChannelNotFound {
            handle: "ghost".to_owned(),
        }));
    }

    #[test]
    fn missing_channel_maps_to_channel_not_found() {
        let err: FetchError = YoutubeError::ChannelNotFound {
            handle: "ghost".to_owned(),
        }
        .into();
        assert_eq!(
            err,
            FetchError::ChannelNotFound {
                handle: "ghost".to_owned()
            }
        );
    }

    #[test]
    fn unexpected_status_maps_to_upstream() {
        let err: FetchError = YoutubeError::UnexpectedStatus {
            status: 500,
            endpoint: "videos".to_owned(),
            message: "backend error".to_owned(),
        }
        .into();
        assert!(matches!(err, FetchError::Upstream(ref m) if m.contains("500")));
        assert!(!err.is_retriable());
    }
}
