//! Conversion from raw source records to the analysed [`VideoRecord`] set.

use chrono::{DateTime, Utc};
use tubelens_core::{RawVideo, VideoRecord};

use crate::duration::parse_duration;

/// Builds the analysed video set from raw records, preserving source order.
///
/// Records whose view count is absent, unparseable or zero are excluded:
/// a zero here means the statistics are missing, not that the video earned
/// nothing. Records with an unreadable publish timestamp are also dropped.
#[must_use]
pub fn normalize_videos(raw: Vec<RawVideo>) -> Vec<VideoRecord> {
    raw.into_iter().filter_map(normalize_video).collect()
}

/// Normalizes one record, or `None` if it is excluded from analysis.
#[must_use]
pub fn normalize_video(raw: RawVideo) -> Option<VideoRecord> {
    let views = raw.view_count.as_ref().map_or(0, tubelens_core::RawCount::value);
    if views == 0 {
        tracing::debug!(video_id = %raw.video_id, "skipping video without view statistics");
        return None;
    }

    let published_at = match DateTime::parse_from_rfc3339(raw.published_at.trim()) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(
                video_id = %raw.video_id,
                published_at = %raw.published_at,
                error = %e,
                "skipping video with unreadable publish timestamp"
            );
            return None;
        }
    };

    Some(VideoRecord {
        views,
        likes: raw.like_count.as_ref().map_or(0, tubelens_core::RawCount::value),
        duration_seconds: parse_duration(&raw.duration).total_seconds,
        published_at,
        thumbnail_url: raw.thumbnail_url.filter(|u| !u.is_empty()),
        title: raw.title,
        video_id: raw.video_id,
    })
}
