//! Title tokenization, keyword frequency and structural pattern flags.
//!
//! Matching is plain case-insensitive substring search; there is no stemming
//! or language model behind any of it.

use std::collections::HashMap;

use serde::Serialize;
use tubelens_core::VideoRecord;

use crate::stats::{rank_by_views, TOP_N};

/// Keywords reported for the whole video set.
pub const FULL_SET_KEYWORDS: usize = 8;
/// Keywords reported for the top-video subset.
pub const TOP_SET_KEYWORDS: usize = 5;
/// A token must appear at least this often to count as a keyword.
pub const MIN_KEYWORD_COUNT: usize = 2;
/// Pattern flags look at this many of the most-viewed titles.
pub const PATTERN_SAMPLE: usize = 5;

/// Structural title patterns among the best-performing videos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PatternFlags {
    /// A title contains ` vs `.
    pub comparison: bool,
    /// A title contains `review`.
    pub review: bool,
    /// A title contains `first` or `new`.
    pub first_look: bool,
    /// A title contains `!` or `?`.
    pub engaging_punctuation: bool,
}

impl PatternFlags {
    #[must_use]
    pub fn any(self) -> bool {
        self.comparison || self.review || self.first_look || self.engaging_punctuation
    }
}

/// Output of [`analyze_titles`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexicalSummary {
    /// Up to [`FULL_SET_KEYWORDS`] recurring words across every title.
    pub keywords: Vec<String>,
    /// Up to [`TOP_SET_KEYWORDS`] recurring words across the top-10 titles.
    pub top_video_keywords: Vec<String>,
    pub patterns: PatternFlags,
}

/// Lower-cased whitespace tokens longer than three characters that are not
/// purely numeric.
pub fn tokenize(title: &str) -> impl Iterator<Item = String> + '_ {
    title
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > 3)
        .filter(|t| !t.chars().all(|c| c.is_ascii_digit()))
}

/// Token counts ordered by descending frequency, ties in first-seen order.
pub fn keyword_frequencies<'a, I>(titles: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for title in titles {
        for token in tokenize(title) {
            if let Some(&i) = index.get(&token) {
                counts[i].1 += 1;
            } else {
                index.insert(token.clone(), counts.len());
                counts.push((token, 1));
            }
        }
    }

    // Stable sort keeps first-occurrence order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `limit` most frequent tokens that occur at least
/// [`MIN_KEYWORD_COUNT`] times.
pub fn top_keywords<'a, I>(titles: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    keyword_frequencies(titles)
        .into_iter()
        .filter(|(_, count)| *count >= MIN_KEYWORD_COUNT)
        .take(limit)
        .map(|(word, _)| word)
        .collect()
}

/// Flag structural patterns across the given titles.
pub fn detect_patterns<'a, I>(titles: I) -> PatternFlags
where
    I: IntoIterator<Item = &'a str>,
{
    let mut flags = PatternFlags::default();
    for title in titles {
        let lower = title.to_lowercase();
        flags.comparison |= lower.contains(" vs ");
        flags.review |= lower.contains("review");
        flags.first_look |= lower.contains("first") || lower.contains("new");
        flags.engaging_punctuation |= lower.contains('!') || lower.contains('?');
    }
    flags
}

/// Keyword rankings for the full set and the top-10 subset, plus pattern
/// flags over the top-5 titles.
#[must_use]
pub fn analyze_titles(videos: &[VideoRecord]) -> LexicalSummary {
    let ranked = rank_by_views(videos);
    let top_titles = || ranked.iter().take(TOP_N).map(|v| v.title.as_str());

    LexicalSummary {
        keywords: top_keywords(videos.iter().map(|v| v.title.as_str()), FULL_SET_KEYWORDS),
        top_video_keywords: top_keywords(top_titles(), TOP_SET_KEYWORDS),
        patterns: detect_patterns(top_titles().take(PATTERN_SAMPLE)),
    }
}
