//! Descriptive statistics over an analysed video set.
//!
//! Every figure here is a plain aggregate: means, counts and stable rankings.
//! Rankings sort by descending views and keep source order among ties.

use chrono::{DateTime, Duration, Utc};
use tubelens_core::VideoRecord;

use crate::error::EmptySetError;

/// Size of the "top videos" subset.
pub const TOP_N: usize = 10;
/// Size of the bottom subset examined for underperformers.
pub const BOTTOM_N: usize = 5;
/// Recency window for upload-frequency counts.
pub const RECENT_WINDOW_DAYS: i64 = 30;
/// Fraction of the mean below which a bottom video counts as underperforming.
pub const UNDERPERFORMER_THRESHOLD: f64 = 0.5;

/// Videos ordered by descending views; ties keep source order.
#[must_use]
pub fn rank_by_views(videos: &[VideoRecord]) -> Vec<&VideoRecord> {
    let mut ranked: Vec<&VideoRecord> = videos.iter().collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked
}

/// The first `n` videos of [`rank_by_views`], cloned. Empty input yields an
/// empty list.
#[must_use]
pub fn top_videos(videos: &[VideoRecord], n: usize) -> Vec<VideoRecord> {
    rank_by_views(videos).into_iter().take(n).cloned().collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = u64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v as f64, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Read-only statistics view over one channel's analysed videos.
#[derive(Debug, Clone, Copy)]
pub struct StatsSummarizer<'a> {
    videos: &'a [VideoRecord],
}

impl<'a> StatsSummarizer<'a> {
    #[must_use]
    pub fn new(videos: &'a [VideoRecord]) -> Self {
        Self { videos }
    }

    /// Arithmetic mean of views.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySetError`] when there are no videos.
    pub fn average_views(&self) -> Result<f64, EmptySetError> {
        mean(self.videos.iter().map(|v| v.views)).ok_or(EmptySetError)
    }

    /// Mean views across the `n` most-viewed videos. Sets smaller than `n`
    /// use every video, so for small channels this equals
    /// [`Self::average_views`].
    ///
    /// # Errors
    ///
    /// Returns [`EmptySetError`] when there are no videos.
    pub fn top_average_views(&self, n: usize) -> Result<f64, EmptySetError> {
        mean(rank_by_views(self.videos).into_iter().take(n).map(|v| v.views))
            .ok_or(EmptySetError)
    }

    /// Mean length in minutes across videos with a known (non-zero) duration.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_duration_minutes(&self) -> Option<f64> {
        mean(
            self.videos
                .iter()
                .map(|v| v.duration_seconds)
                .filter(|&secs| secs > 0),
        )
        .map(|secs| secs / 60.0)
    }

    /// Qualitative note on typical video length, present only when at least
    /// one video has a known duration.
    #[must_use]
    pub fn duration_correlation_note(&self) -> Option<String> {
        self.mean_duration_minutes()
            .map(|minutes| format!("Average video length is {minutes:.1} minutes"))
    }

    /// Mean of the whole-minute component of every video's duration,
    /// including videos whose duration is unknown (counted as zero).
    #[must_use]
    pub fn mean_whole_minutes(&self) -> Option<f64> {
        mean(self.videos.iter().map(|v| v.duration_seconds / 60))
    }

    /// Number of videos published within `window_days` before `now`.
    ///
    /// `now` is the evaluation instant, not derived from the videos.
    #[must_use]
    pub fn recent_upload_count(&self, now: DateTime<Utc>, window_days: i64) -> usize {
        let window = Duration::days(window_days);
        self.videos
            .iter()
            .filter(|v| now.signed_duration_since(v.published_at) <= window)
            .count()
    }

    /// Among the [`BOTTOM_N`] least-viewed videos, how many fall below
    /// `threshold × average_views()`.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySetError`] when there are no videos.
    #[allow(clippy::cast_precision_loss)]
    pub fn underperformer_count(&self, threshold: f64) -> Result<usize, EmptySetError> {
        let cutoff = threshold * self.average_views()?;
        let mut ascending: Vec<&VideoRecord> = self.videos.iter().collect();
        ascending.sort_by_key(|v| v.views);
        Ok(ascending
            .into_iter()
            .take(BOTTOM_N)
            .filter(|v| (v.views as f64) < cutoff)
            .count())
    }

    /// The single most-viewed video (first in source order among ties).
    #[must_use]
    pub fn best_video(&self) -> Option<&'a VideoRecord> {
        rank_by_views(self.videos).into_iter().next()
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
