//! Template-based title suggestions and the one-line success formula.
//!
//! Suggestions are deterministic: pattern templates in priority order
//! (comparison, review, first look), then generic templates in list order
//! until exactly [`SUGGESTION_COUNT`] are collected.

use serde::Serialize;
use tubelens_core::VideoRecord;

use crate::insights::InsightSet;
use crate::lexical::PatternFlags;
use crate::stats::StatsSummarizer;

pub const SUGGESTION_COUNT: usize = 3;

/// Placeholder replaced by the channel's leading keyword.
const TOPIC: &str = "{topic}";
/// Used when the channel has no recurring keyword.
const FALLBACK_TOPIC: &str = "This Topic";
/// Keywords that only mark a pattern and make a poor topic.
const PATTERN_WORDS: &[&str] = &["review", "reviews", "first", "new"];

const COMPARISON_TEMPLATE: &str = "{topic} vs The Competition: Which One Actually Wins?";
const REVIEW_TEMPLATE: &str = "Honest {topic} Review: Is It Really Worth It?";
const FIRST_LOOK_TEMPLATE: &str = "First Look: The New {topic} Changes Everything";

const GENERIC_TEMPLATES: [&str; SUGGESTION_COUNT] = [
    "The Complete {topic} Guide for Beginners",
    "{topic}: 5 Things Nobody Tells You",
    "Why Everyone Is Talking About {topic}",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationSet {
    /// Always exactly [`SUGGESTION_COUNT`] entries.
    pub title_suggestions: Vec<String>,
    pub success_formula: String,
}

/// Pattern templates for the detected flags, in priority order.
fn pattern_templates(patterns: PatternFlags) -> Vec<&'static str> {
    [
        (patterns.comparison, COMPARISON_TEMPLATE),
        (patterns.review, REVIEW_TEMPLATE),
        (patterns.first_look, FIRST_LOOK_TEMPLATE),
    ]
    .into_iter()
    .filter_map(|(detected, template)| detected.then_some(template))
    .collect()
}

/// Exactly three title suggestions for `patterns`, with `{topic}` filled in.
#[must_use]
pub fn title_suggestions(patterns: PatternFlags, topic: &str) -> Vec<String> {
    let mut templates = pattern_templates(patterns);
    templates.truncate(SUGGESTION_COUNT);

    let missing = SUGGESTION_COUNT - templates.len();
    templates.extend(GENERIC_TEMPLATES.iter().take(missing));

    templates
        .into_iter()
        .map(|t| t.replace(TOPIC, topic))
        .collect()
}

/// "Focus on ..." sentence naming the detected patterns and the typical
/// video length in whole minutes.
#[must_use]
pub fn success_formula(patterns: PatternFlags, typical_minutes: u64) -> String {
    let mut formula = String::from("Focus on ");
    if patterns.comparison {
        formula.push_str("comparison content, ");
    }
    if patterns.review {
        formula.push_str("honest reviews, ");
    }
    if patterns.first_look {
        formula.push_str("trending/new topics, ");
    }
    formula.push_str(&format!("maintain {typical_minutes}-minute videos"));
    formula.replace(", maintain", " and maintain")
}

/// Keyword that fills the `{topic}` slot: the leading top-video keyword,
/// else the leading overall keyword, title-cased. Pattern marker words are
/// skipped.
fn topic_for(insights: &InsightSet) -> String {
    let lexical = &insights.lexical;
    lexical
        .top_video_keywords
        .iter()
        .chain(&lexical.keywords)
        .find(|k| !PATTERN_WORDS.contains(&k.as_str()))
        .map_or_else(|| FALLBACK_TOPIC.to_string(), |k| title_case(k))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Builds recommendations from a channel's insights and its analysed videos.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate_recommendations(insights: &InsightSet, videos: &[VideoRecord]) -> RecommendationSet {
    let patterns = insights.lexical.patterns;
    let typical_minutes = StatsSummarizer::new(videos)
        .mean_whole_minutes()
        .map_or(0, |m| m.round().max(0.0) as u64);

    RecommendationSet {
        title_suggestions: title_suggestions(patterns, &topic_for(insights)),
        success_formula: success_formula(patterns, typical_minutes),
    }
}
