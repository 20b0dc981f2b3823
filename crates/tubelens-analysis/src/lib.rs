//! Channel analysis engine: statistics, title lexicon, insights and
//! recommendations over a channel's uploads, plus batch orchestration.

pub mod batch;
pub mod clock;
pub mod duration;
pub mod error;
pub mod insights;
pub mod lexical;
pub mod normalize;
pub mod pipeline;
pub mod recommend;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use batch::{BatchAggregate, BatchOrchestrator, BatchRunResult, ChannelFailure};
pub use clock::{Clock, FixedClock, SystemClock};
pub use duration::{parse_duration, VideoDuration};
pub use error::{AnalysisError, EmptySetError, FailureKind};
pub use insights::{compose_insights, format_views, group_thousands, InsightSet};
pub use lexical::{analyze_titles, LexicalSummary, PatternFlags};
pub use normalize::normalize_videos;
pub use pipeline::{analyze_videos, ChannelAnalysisResult, ChannelAnalyzer};
pub use recommend::{generate_recommendations, RecommendationSet};
pub use stats::StatsSummarizer;
