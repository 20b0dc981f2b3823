//! Single-channel analysis: fetch, normalize, summarize, recommend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tubelens_core::{ChannelEntry, ChannelSource, ChannelSummary, VideoRecord};

use crate::clock::Clock;
use crate::error::AnalysisError;
use crate::insights::{compose_insights, InsightSet};
use crate::normalize::normalize_videos;
use crate::recommend::{generate_recommendations, RecommendationSet};

/// Complete analysis of one channel. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelAnalysisResult {
    pub handle: String,
    pub description: Option<String>,
    pub summary: ChannelSummary,
    pub videos: Vec<VideoRecord>,
    pub insights: InsightSet,
    pub recommendations: RecommendationSet,
    /// Evaluation instant used for recency statistics.
    pub analyzed_at: DateTime<Utc>,
}

/// Runs the analysis stages over an already-filtered video set.
///
/// This is a pure function of its inputs; the same videos, summary and
/// `now` always produce the same result.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyVideoSet`] when `videos` is empty.
pub fn analyze_videos(
    entry: &ChannelEntry,
    summary: ChannelSummary,
    videos: Vec<VideoRecord>,
    now: DateTime<Utc>,
) -> Result<ChannelAnalysisResult, AnalysisError> {
    let insights = compose_insights(&videos, now).map_err(|_| AnalysisError::EmptyVideoSet {
        handle: entry.handle.clone(),
    })?;
    let recommendations = generate_recommendations(&insights, &videos);

    Ok(ChannelAnalysisResult {
        handle: entry.handle.clone(),
        description: entry.description.clone(),
        summary,
        videos,
        insights,
        recommendations,
        analyzed_at: now,
    })
}

/// Drives one channel through the data source and the analysis stages.
///
/// Rate-limit retries belong to the source, which knows which request
/// failed; the analyzer makes a single `fetch_channel` call.
pub struct ChannelAnalyzer<S, C> {
    source: S,
    clock: C,
}

impl<S: ChannelSource, C: Clock> ChannelAnalyzer<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        Self { source, clock }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Fetches and analyses one channel.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::Fetch`] when the data source fails, including a
    ///   rate limit the source could not retry past.
    /// - [`AnalysisError::EmptyVideoSet`] when no upload has view statistics.
    pub async fn analyze(&self, entry: &ChannelEntry) -> Result<ChannelAnalysisResult, AnalysisError> {
        let handle = entry.handle.as_str();
        let snapshot = self.source.fetch_channel(handle).await?;

        let fetched = snapshot.videos.len();
        let videos = normalize_videos(snapshot.videos);
        tracing::debug!(handle, fetched, analysed = videos.len(), "normalized uploads");

        if videos.is_empty() {
            return Err(AnalysisError::EmptyVideoSet {
                handle: handle.to_owned(),
            });
        }

        analyze_videos(entry, snapshot.summary, videos, self.clock.now())
    }
}
