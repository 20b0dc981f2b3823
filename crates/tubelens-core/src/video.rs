use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One analysed upload. Built by the engine's normalization step and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub title: String,
    pub video_id: String,
    pub views: u64,
    pub likes: u64,
    pub published_at: DateTime<Utc>,
    pub duration_seconds: u64,
    pub thumbnail_url: Option<String>,
}

/// Channel-level context reported by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub display_name: String,
    pub subscriber_count: u64,
    pub total_video_count: u64,
    pub handle: String,
}

/// A statistics counter as delivered upstream: the Data API sends counts as
/// decimal strings, fixtures and other sources may send plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(u64),
    Text(String),
}

impl RawCount {
    /// Interprets the counter, treating anything unparseable as `0`.
    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            RawCount::Number(n) => *n,
            RawCount::Text(s) => s.trim().parse::<u64>().unwrap_or(0),
        }
    }
}

impl From<u64> for RawCount {
    fn from(n: u64) -> Self {
        RawCount::Number(n)
    }
}

/// An unprocessed video record as handed over by a [`crate::ChannelSource`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawVideo {
    pub title: String,
    pub video_id: String,
    pub view_count: Option<RawCount>,
    pub like_count: Option<RawCount>,
    /// RFC 3339 timestamp, e.g. `2024-05-01T15:00:00Z`.
    pub published_at: String,
    /// ISO 8601 duration designator, e.g. `PT1H23M45S`.
    pub duration: String,
    pub thumbnail_url: Option<String>,
}

/// Everything the engine needs about one channel from the data source.
#[derive(Debug, Clone)]
pub struct ChannelSnapshot {
    pub summary: ChannelSummary,
    pub videos: Vec<RawVideo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_count_parses_text_and_numbers() {
        assert_eq!(RawCount::Text("1234".to_string()).value(), 1234);
        assert_eq!(RawCount::Text(" 42 ".to_string()).value(), 42);
        assert_eq!(RawCount::Number(7).value(), 7);
    }

    #[test]
    fn raw_count_garbage_is_zero() {
        assert_eq!(RawCount::Text("n/a".to_string()).value(), 0);
        assert_eq!(RawCount::Text(String::new()).value(), 0);
    }

    #[test]
    fn raw_count_deserializes_untagged() {
        let text: RawCount = serde_json::from_str("\"15\"").expect("text count");
        let num: RawCount = serde_json::from_str("15").expect("numeric count");
        assert_eq!(text.value(), 15);
        assert_eq!(num.value(), 15);
    }
}
