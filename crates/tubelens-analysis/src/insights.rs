//! Threshold-driven insight statements built from stats and lexical output.
//!
//! Each rule is evaluated independently; a rule whose condition does not hold
//! contributes nothing. Lists are never padded.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tubelens_core::VideoRecord;

use crate::error::EmptySetError;
use crate::lexical::{analyze_titles, LexicalSummary};
use crate::stats::{
    top_videos, StatsSummarizer, BOTTOM_N, RECENT_WINDOW_DAYS, TOP_N, UNDERPERFORMER_THRESHOLD,
};

/// Minimum recent uploads before cadence is called out.
pub const RECENT_UPLOADS_NOTABLE: usize = 3;
/// A video above this multiple of the mean is called a breakout.
pub const BREAKOUT_MULTIPLIER: f64 = 5.0;
/// Underperformers among the bottom five before they are flagged.
pub const UNDERPERFORMERS_NOTABLE: usize = 3;
/// Keywords listed in the recurring-theme line.
pub const THEME_KEYWORDS: usize = 5;
/// Characters of a breakout title quoted in its recommendation.
pub const TITLE_EXCERPT_CHARS: usize = 50;

/// Keywords that mark tutorial-style content.
const TUTORIAL_KEYWORDS: &[&str] = &["tutorial", "how"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSet {
    pub performance_patterns: Vec<String>,
    pub content_themes: Vec<String>,
    pub optimization_opportunities: Vec<String>,
    pub average_views: f64,
    /// Most-viewed videos, descending, at most [`TOP_N`].
    pub top_videos: Vec<VideoRecord>,
    pub lexical: LexicalSummary,
}

/// Builds the insight set for one channel's analysed videos, evaluated at
/// `now`.
///
/// # Errors
///
/// Returns [`EmptySetError`] when `videos` is empty.
pub fn compose_insights(
    videos: &[VideoRecord],
    now: DateTime<Utc>,
) -> Result<InsightSet, EmptySetError> {
    let stats = StatsSummarizer::new(videos);
    let lexical = analyze_titles(videos);
    let average_views = stats.average_views()?;

    let performance_patterns = performance_patterns(&stats, average_views, now)?;
    let content_themes = content_themes(&lexical);
    let optimization_opportunities = optimization_opportunities(&stats, &lexical, average_views)?;

    Ok(InsightSet {
        performance_patterns,
        content_themes,
        optimization_opportunities,
        average_views,
        top_videos: top_videos(videos, TOP_N),
        lexical,
    })
}

#[allow(clippy::cast_possible_truncation)]
fn performance_patterns(
    stats: &StatsSummarizer<'_>,
    average_views: f64,
    now: DateTime<Utc>,
) -> Result<Vec<String>, EmptySetError> {
    let mut lines = Vec::new();

    let top_average = stats.top_average_views(TOP_N)?;
    if top_average > average_views {
        let lift = ((top_average / average_views - 1.0) * 100.0).round() as i64;
        lines.push(format!(
            "Top-performing videos average {} views, {lift}% above the channel average of {}",
            format_views(top_average),
            format_views(average_views),
        ));
    }

    if let Some(note) = stats.duration_correlation_note() {
        lines.push(note);
    }

    let recent = stats.recent_upload_count(now, RECENT_WINDOW_DAYS);
    if recent >= RECENT_UPLOADS_NOTABLE {
        lines.push(format!(
            "Active upload schedule: {recent} videos published in the last {RECENT_WINDOW_DAYS} days"
        ));
    }

    Ok(lines)
}

fn content_themes(lexical: &LexicalSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if !lexical.keywords.is_empty() {
        let words: Vec<&str> = lexical
            .keywords
            .iter()
            .take(THEME_KEYWORDS)
            .map(String::as_str)
            .collect();
        lines.push(format!("Recurring title keywords: {}", words.join(", ")));
    }

    if !lexical.top_video_keywords.is_empty() {
        lines.push(format!(
            "Top-performing titles emphasize: {}",
            lexical.top_video_keywords.join(", ")
        ));
    }

    lines
}

fn optimization_opportunities(
    stats: &StatsSummarizer<'_>,
    lexical: &LexicalSummary,
    average_views: f64,
) -> Result<Vec<String>, EmptySetError> {
    let mut lines = Vec::new();

    if let Some(best) = stats.best_video() {
        #[allow(clippy::cast_precision_loss)]
        let best_views = best.views as f64;
        if best_views > BREAKOUT_MULTIPLIER * average_views {
            lines.push(format!(
                "Replicate the elements of \"{}\" ({} views, {:.1}x the channel average)",
                excerpt(&best.title, TITLE_EXCERPT_CHARS),
                format_views(best_views),
                best_views / average_views,
            ));
        }
    }

    let underperformers = stats.underperformer_count(UNDERPERFORMER_THRESHOLD)?;
    if underperformers >= UNDERPERFORMERS_NOTABLE {
        lines.push(format!(
            "{underperformers} of the {BOTTOM_N} lowest-viewed videos drew under half the average views; revisit their topics and thumbnails"
        ));
    }

    if lexical
        .keywords
        .iter()
        .any(|k| TUTORIAL_KEYWORDS.contains(&k.as_str()))
    {
        lines.push(
            "Tutorial content recurs in titles; step-by-step formats are a proven draw for this audience"
                .to_string(),
        );
    }

    Ok(lines)
}

/// The first `max_chars` characters of `title` followed by an ellipsis.
fn excerpt(title: &str, max_chars: usize) -> String {
    let head: String = title.chars().take(max_chars).collect();
    format!("{head}...")
}

/// Whole number with thousands separators, e.g. `1,234,568`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_views(value: f64) -> String {
    let rounded = value.round().max(0.0) as u64;
    group_thousands(rounded)
}

#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "insights_test.rs"]
mod tests;
