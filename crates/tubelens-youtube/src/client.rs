//! HTTP client for the YouTube Data API v3.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tubelens_core::{
    ChannelSnapshot, ChannelSource, ChannelSummary, FetchError, RawVideo, RetryPolicy,
};

use crate::error::YoutubeError;
use crate::types::{
    ApiErrorEnvelope, ChannelListResponse, PlaylistItemListResponse, VideoItem, VideoListResponse,
};

/// The API caps `maxResults` and the `id` filter at 50 per request.
const PAGE_SIZE: u32 = 50;

/// Error reasons the API uses for quota and throttling failures.
const RATE_LIMIT_REASONS: &[&str] = &[
    "quotaExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "dailyLimitExceeded",
];

/// Channel lookup result: summary plus the playlist holding its uploads.
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub uploads_playlist_id: String,
    pub summary: ChannelSummary,
}

/// HTTP client for the three read-only endpoints the analysis needs.
///
/// Quota failures (HTTP 429, or 403 with a quota reason) surface as
/// [`YoutubeError::RateLimited`]. Each request is retried on its own under
/// the configured [`RetryPolicy`], so a throttled `videos` call never repeats
/// the channel lookup that already succeeded.
pub struct YoutubeClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_videos: u32,
    retry: RetryPolicy,
}

impl YoutubeClient {
    /// Creates a client against `base_url` (normally
    /// `https://www.googleapis.com/youtube/v3`).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_videos: u32,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
            max_videos: max_videos.max(1),
            retry: RetryPolicy::none(),
        })
    }

    /// Retry rate-limited requests per `policy`. The default never retries.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Resolves a handle to its channel summary and uploads playlist.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ChannelNotFound`] when no channel matches.
    /// - [`YoutubeError::MissingUploadsPlaylist`] when the channel has no
    ///   uploads playlist.
    /// - Any request-level error from [`Self::get_json`].
    pub async fn fetch_channel_info(&self, handle: &str) -> Result<ChannelInfo, YoutubeError> {
        let for_handle = format!("@{handle}");
        let response: ChannelListResponse = self
            .get_json(
                "channels",
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("forHandle", for_handle.as_str()),
                ],
            )
            .await?;

        let item = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::ChannelNotFound {
                handle: handle.to_owned(),
            })?;

        let uploads_playlist_id = item
            .content_details
            .and_then(|c| c.related_playlists.uploads)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| YoutubeError::MissingUploadsPlaylist {
                handle: handle.to_owned(),
            })?;

        let (subscriber_count, total_video_count) = item.statistics.map_or((0, 0), |s| {
            (
                s.subscriber_count.map_or(0, |c| c.value()),
                s.video_count.map_or(0, |c| c.value()),
            )
        });

        Ok(ChannelInfo {
            channel_id: item.id,
            uploads_playlist_id,
            summary: ChannelSummary {
                display_name: item.snippet.title,
                subscriber_count,
                total_video_count,
                handle: handle.to_owned(),
            },
        })
    }

    /// Lists the most recent upload ids from a playlist, newest first, up to
    /// the configured `max_videos`.
    ///
    /// # Errors
    ///
    /// Propagates request-level errors from [`Self::get_json`].
    pub async fn fetch_upload_ids(&self, playlist_id: &str) -> Result<Vec<String>, YoutubeError> {
        let limit = usize::try_from(self.max_videos).unwrap_or(usize::MAX);
        let mut ids: Vec<String> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let remaining = limit.saturating_sub(ids.len());
            let max_results = remaining.min(PAGE_SIZE as usize).to_string();
            let mut query: Vec<(&str, &str)> = vec![
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", max_results.as_str()),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let page: PlaylistItemListResponse = self.get_json("playlistItems", &query).await?;
            let fetched = page.items.len();
            ids.extend(page.items.into_iter().map(|i| i.content_details.video_id));

            tracing::debug!(playlist_id, fetched, total = ids.len(), "fetched upload page");

            match page.next_page_token {
                Some(token) if ids.len() < limit && fetched > 0 => page_token = Some(token),
                _ => break,
            }
        }

        ids.truncate(limit);
        Ok(ids)
    }

    /// Fetches snippet, statistics and duration for the given ids in chunks
    /// of 50. Videos the API no longer returns (deleted, private) are simply
    /// absent from the result.
    ///
    /// # Errors
    ///
    /// Propagates request-level errors from [`Self::get_json`].
    pub async fn fetch_video_details(&self, ids: &[String]) -> Result<Vec<RawVideo>, YoutubeError> {
        let mut videos = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(PAGE_SIZE as usize) {
            let joined = chunk.join(",");
            let response: VideoListResponse = self
                .get_json(
                    "videos",
                    &[("part", "snippet,statistics,contentDetails"), ("id", joined.as_str())],
                )
                .await?;
            videos.extend(response.items.into_iter().map(raw_video_from_item));
        }

        Ok(videos)
    }

    /// Issues a GET against `{base_url}/{endpoint}` with the API key attached
    /// and decodes the JSON body, retrying rate-limit failures per the
    /// client's [`RetryPolicy`].
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::RateLimited`]: HTTP 429, or 403 carrying a quota reason.
    /// - [`YoutubeError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`YoutubeError::Http`]: network or TLS failure.
    /// - [`YoutubeError::Deserialize`]: response body does not match `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        self.retry.retry(|| self.get_json_once(endpoint, query)).await
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status.as_u16(), endpoint, &body));
        }

        serde_json::from_str::<T>(&body).map_err(|e| YoutubeError::Deserialize {
            context: format!("{endpoint} response"),
            source: e,
        })
    }
}

/// Turns a non-2xx response into a typed error, reading the API's error
/// envelope when one is present.
fn classify_error(status: u16, endpoint: &str, body: &str) -> YoutubeError {
    let envelope = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
    let reason = envelope
        .as_ref()
        .and_then(|e| e.error.errors.first())
        .map(|d| d.reason.clone())
        .unwrap_or_default();
    let message = envelope
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.chars().take(200).collect());

    let quota_failure = status == 403 && RATE_LIMIT_REASONS.contains(&reason.as_str());
    if status == 429 || quota_failure {
        let reason = if reason.is_empty() { message } else { reason };
        return YoutubeError::RateLimited { status, reason };
    }

    YoutubeError::UnexpectedStatus {
        status,
        endpoint: endpoint.to_owned(),
        message,
    }
}

fn raw_video_from_item(item: VideoItem) -> RawVideo {
    let (view_count, like_count) = item
        .statistics
        .map_or((None, None), |s| (s.view_count, s.like_count));

    RawVideo {
        title: item.snippet.title,
        video_id: item.id,
        view_count,
        like_count,
        published_at: item.snippet.published_at,
        duration: item
            .content_details
            .and_then(|c| c.duration)
            .unwrap_or_default(),
        thumbnail_url: item.snippet.thumbnails.and_then(|t| t.best_url()),
    }
}

#[async_trait::async_trait]
impl ChannelSource for YoutubeClient {
    async fn fetch_channel(&self, handle: &str) -> Result<ChannelSnapshot, FetchError> {
        let info = self.fetch_channel_info(handle).await?;
        tracing::debug!(
            handle,
            channel_id = %info.channel_id,
            playlist = %info.uploads_playlist_id,
            "resolved channel"
        );

        let ids = self.fetch_upload_ids(&info.uploads_playlist_id).await?;
        let videos = self.fetch_video_details(&ids).await?;
        tracing::info!(handle, videos = videos.len(), "fetched channel uploads");

        Ok(ChannelSnapshot {
            summary: info.summary,
            videos,
        })
    }
}
