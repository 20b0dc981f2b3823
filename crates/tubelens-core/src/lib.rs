pub mod app_config;
pub mod channels;
pub mod config;
pub mod retry;
pub mod source;
pub mod video;

pub use app_config::{AppConfig, Environment};
pub use channels::{load_channels, normalize_handle, parse_channels, ChannelEntry, ChannelsFile};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use retry::{Retriable, RetryPolicy};
pub use source::{ChannelSource, FetchError};
pub use video::{ChannelSnapshot, ChannelSummary, RawCount, RawVideo, VideoRecord};
