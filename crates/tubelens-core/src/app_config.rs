use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub env: Environment,
    pub log_level: String,
    pub api_base_url: String,
    pub channels_path: PathBuf,
    pub reports_dir: PathBuf,
    pub max_videos: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub inter_channel_delay_ms: u64,
}

impl AppConfig {
    /// The retry policy applied to every data-source call.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs(self.retry_backoff_base_secs),
        )
    }

    /// Pause inserted between channels in a batch run.
    #[must_use]
    pub fn inter_channel_delay(&self) -> Duration {
        Duration::from_millis(self.inter_channel_delay_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &"[redacted]")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("channels_path", &self.channels_path)
            .field("reports_dir", &self.reports_dir)
            .field("max_videos", &self.max_videos)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("inter_channel_delay_ms", &self.inter_channel_delay_ms)
            .finish()
    }
}
