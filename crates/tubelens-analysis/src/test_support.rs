//! Fixtures shared by the engine's unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tubelens_core::{
    ChannelSnapshot, ChannelSource, ChannelSummary, FetchError, RawCount, RawVideo, VideoRecord,
};

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid fixture instant")
}

/// A video published `age_days` before [`now`].
pub(crate) fn video(title: &str, views: u64, duration_seconds: u64, age_days: i64) -> VideoRecord {
    VideoRecord {
        title: title.to_owned(),
        video_id: format!("id-{}", title.to_lowercase().replace(' ', "-")),
        views,
        likes: views / 20,
        published_at: now() - Duration::days(age_days),
        duration_seconds,
        thumbnail_url: None,
    }
}

/// Videos titled `Video 1..=n` with the given view counts, ten minutes
/// long, published a week apart.
pub(crate) fn videos_with_views(views: &[u64]) -> Vec<VideoRecord> {
    views
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let age = i64::try_from(i).unwrap_or(0) * 7;
            video(&format!("Video {}", i + 1), v, 600, age)
        })
        .collect()
}

pub(crate) fn summary(handle: &str) -> ChannelSummary {
    ChannelSummary {
        display_name: format!("{handle} channel"),
        subscriber_count: 10_000,
        total_video_count: 120,
        handle: handle.to_owned(),
    }
}

/// A raw upload published in May 2024, twelve and a half minutes long.
pub(crate) fn raw_video(id: &str, title: &str, views: u64) -> RawVideo {
    RawVideo {
        title: title.to_owned(),
        video_id: id.to_owned(),
        view_count: Some(RawCount::Text(views.to_string())),
        like_count: Some(RawCount::Number(views / 25)),
        published_at: "2024-05-20T10:00:00Z".to_owned(),
        duration: "PT12M30S".to_owned(),
        thumbnail_url: None,
    }
}

/// A channel snapshot with `count` uploads of increasing view counts.
pub(crate) fn snapshot(handle: &str, count: u64) -> ChannelSnapshot {
    ChannelSnapshot {
        summary: summary(handle),
        videos: (1..=count)
            .map(|i| raw_video(&format!("{handle}-{i}"), &format!("Episode {i} review"), i * 100))
            .collect(),
    }
}

/// Scripted [`ChannelSource`] that records how often each handle is fetched.
#[derive(Default)]
pub(crate) struct FakeSource {
    responses: HashMap<String, Result<ChannelSnapshot, FetchError>>,
    calls: Mutex<HashMap<String, u32>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_channel(
        mut self,
        handle: &str,
        response: Result<ChannelSnapshot, FetchError>,
    ) -> Self {
        self.responses.insert(handle.to_owned(), response);
        self
    }

    pub(crate) fn calls(&self, handle: &str) -> u32 {
        self.calls
            .lock()
            .expect("calls lock")
            .get(handle)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl ChannelSource for FakeSource {
    async fn fetch_channel(&self, handle: &str) -> Result<ChannelSnapshot, FetchError> {
        *self
            .calls
            .lock()
            .expect("calls lock")
            .entry(handle.to_owned())
            .or_insert(0) += 1;

        self.responses
            .get(handle)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::ChannelNotFound {
                    handle: handle.to_owned(),
                })
            })
    }
}
