//! Sequential multi-channel runs with per-channel failure isolation.
//!
//! Channels are processed one at a time, in list order, with a fixed pause
//! between them so the shared API quota is spent evenly. A failing channel
//! is recorded and skipped; it never aborts the run.

use std::time::Duration;

use serde::Serialize;
use tubelens_core::{ChannelEntry, ChannelSource};

use crate::clock::Clock;
use crate::error::FailureKind;
use crate::pipeline::{ChannelAnalysisResult, ChannelAnalyzer};

/// One channel that could not be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelFailure {
    pub handle: String,
    pub kind: FailureKind,
    /// Human-readable cause, always non-empty.
    pub reason: String,
}

/// Cross-channel totals over the successful channels only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAggregate {
    pub channels: usize,
    pub total_subscribers: u64,
    /// Mean of the per-channel average views.
    pub mean_average_views: f64,
    pub total_videos_analyzed: usize,
}

impl BatchAggregate {
    /// `None` when nothing succeeded.
    #[must_use]
    pub fn from_results(results: &[ChannelAnalysisResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let total_subscribers = results.iter().map(|r| r.summary.subscriber_count).sum();
        let total_videos_analyzed = results.iter().map(|r| r.videos.len()).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean_average_views = results
            .iter()
            .map(|r| r.insights.average_views)
            .sum::<f64>()
            / results.len() as f64;

        Some(Self {
            channels: results.len(),
            total_subscribers,
            mean_average_views,
            total_videos_analyzed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRunResult {
    /// Successful analyses in channel-list order.
    pub succeeded: Vec<ChannelAnalysisResult>,
    /// Failures in channel-list order.
    pub failed: Vec<ChannelFailure>,
    pub aggregate: Option<BatchAggregate>,
}

impl BatchRunResult {
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

pub struct BatchOrchestrator<S, C> {
    analyzer: ChannelAnalyzer<S, C>,
    pacing: Duration,
}

impl<S: ChannelSource, C: Clock> BatchOrchestrator<S, C> {
    pub fn new(analyzer: ChannelAnalyzer<S, C>, pacing: Duration) -> Self {
        Self { analyzer, pacing }
    }

    /// Analyses every entry and aggregates the successes.
    ///
    /// Always attempts all channels; failures land in
    /// [`BatchRunResult::failed`].
    pub async fn run(&self, channels: &[ChannelEntry]) -> BatchRunResult {
        tracing::info!(channels = channels.len(), "starting batch run");

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for (i, entry) in channels.iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            tracing::info!(
                handle = %entry.handle,
                position = i + 1,
                total = channels.len(),
                "analysing channel"
            );

            match self.analyzer.analyze(entry).await {
                Ok(result) => {
                    tracing::info!(
                        handle = %entry.handle,
                        videos = result.videos.len(),
                        "channel analysed"
                    );
                    succeeded.push(result);
                }
                Err(e) => {
                    tracing::error!(
                        handle = %entry.handle,
                        kind = %e.kind(),
                        error = %e,
                        "channel analysis failed"
                    );
                    failed.push(ChannelFailure {
                        handle: entry.handle.clone(),
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !failed.is_empty() {
            tracing::warn!(
                failed = failed.len(),
                total = channels.len(),
                "some channels failed during batch run"
            );
        }

        let aggregate = BatchAggregate::from_results(&succeeded);
        tracing::info!(
            succeeded = succeeded.len(),
            failed = failed.len(),
            "batch run complete"
        );

        BatchRunResult {
            succeeded,
            failed,
            aggregate,
        }
    }
}
