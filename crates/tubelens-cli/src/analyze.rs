//! Command handlers for `analyze`, `batch` and `channels`.
//!
//! Single-channel runs propagate every failure. Batch runs record failures
//! per channel and only error when the run itself cannot start.

use std::path::Path;

use anyhow::Context as _;
use tubelens_analysis::{BatchOrchestrator, ChannelAnalyzer, Clock, SystemClock};
use tubelens_core::{load_channels, AppConfig, ChannelEntry};
use tubelens_youtube::YoutubeClient;

use crate::report;

fn build_youtube_client(config: &AppConfig) -> anyhow::Result<YoutubeClient> {
    YoutubeClient::new(
        &config.api_base_url,
        &config.youtube_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_videos,
    )
    .map(|client| client.with_retry_policy(config.retry_policy()))
    .map_err(|e| anyhow::anyhow!("failed to build YouTube client: {e}"))
}

fn build_analyzer(config: &AppConfig) -> anyhow::Result<ChannelAnalyzer<YoutubeClient, SystemClock>> {
    let client = build_youtube_client(config)?;
    Ok(ChannelAnalyzer::new(client, SystemClock))
}

/// Analyse one channel, print it, and write its markdown report.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the channel cannot be
/// analysed, or the report cannot be written.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    handle: &str,
    no_report: bool,
    json: bool,
) -> anyhow::Result<()> {
    let analyzer = build_analyzer(config)?;
    let entry = ChannelEntry::new(handle);

    tracing::info!(handle = %entry.handle, "analysing channel");
    let result = analyzer
        .analyze(&entry)
        .await
        .with_context(|| format!("analysis of @{} failed", entry.handle))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::console_summary(&result));
    }

    if !no_report {
        let path = report::channel_report_path(
            &config.reports_dir,
            &result.handle,
            result.analyzed_at.date_naive(),
        );
        report::write_report(&path, &report::channel_markdown(&result))?;
        println!("report written to {}", path.display());
    }

    Ok(())
}

/// Analyse every channel in the list (or the `--channel` overrides) and
/// write the per-channel reports plus a batch summary.
///
/// # Errors
///
/// Returns an error if the channel list cannot be loaded or is empty, the
/// client cannot be built, or the batch summary cannot be written.
/// Per-channel analysis and report-write failures are logged, not propagated.
pub(crate) async fn run_batch(
    config: &AppConfig,
    channels_path: Option<&Path>,
    handles: &[String],
    no_report: bool,
) -> anyhow::Result<()> {
    let channels = resolve_channels(config, channels_path, handles)?;
    if channels.is_empty() {
        anyhow::bail!("no channels to analyse; add entries to the channel list or pass --channel");
    }

    let orchestrator = BatchOrchestrator::new(build_analyzer(config)?, config.inter_channel_delay());
    let batch = orchestrator.run(&channels).await;

    for result in &batch.succeeded {
        println!("{}", report::console_summary(result));
    }
    for failure in &batch.failed {
        eprintln!("@{} failed ({}): {}", failure.handle, failure.kind, failure.reason);
    }
    println!(
        "batch complete: {} succeeded, {} failed",
        batch.succeeded.len(),
        batch.failed.len()
    );

    if !no_report {
        report::write_channel_reports(&config.reports_dir, &batch.succeeded);

        let generated_at = SystemClock.now();
        let path = report::batch_report_path(&config.reports_dir, generated_at.date_naive());
        report::write_report(&path, &report::batch_markdown(&batch, generated_at))?;
        println!("batch summary written to {}", path.display());
    }

    Ok(())
}

/// `--channel` handles take precedence over the channel list file.
fn resolve_channels(
    config: &AppConfig,
    channels_path: Option<&Path>,
    handles: &[String],
) -> anyhow::Result<Vec<ChannelEntry>> {
    if !handles.is_empty() {
        return Ok(handles.iter().map(|h| ChannelEntry::new(h)).collect());
    }

    let path = channels_path.unwrap_or(&config.channels_path);
    load_channels(path).with_context(|| format!("failed to load channel list {}", path.display()))
}

/// Print the channel list in processing order.
///
/// # Errors
///
/// Returns an error if the channel list cannot be read or parsed.
pub(crate) fn run_list_channels(path: &Path) -> anyhow::Result<()> {
    let channels = load_channels(path)
        .with_context(|| format!("failed to load channel list {}", path.display()))?;

    if channels.is_empty() {
        println!("no channels configured in {}", path.display());
        return Ok(());
    }

    for (i, entry) in channels.iter().enumerate() {
        match entry.description.as_deref() {
            Some(description) => println!("{:>3}. @{} - {description}", i + 1, entry.handle),
            None => println!("{:>3}. @{}", i + 1, entry.handle),
        }
    }
    Ok(())
}
