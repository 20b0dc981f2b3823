//! Console and markdown rendering of analysis results.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, NaiveDate, Utc};
use tubelens_analysis::{
    format_views, group_thousands, BatchRunResult, ChannelAnalysisResult, VideoDuration,
};

const NONE_LINE: &str = "  (none)";

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn bullet_section(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    lines.push(format!("{heading}:"));
    if items.is_empty() {
        lines.push(NONE_LINE.to_string());
    } else {
        lines.extend(items.iter().map(|item| format!("  - {item}")));
    }
}

/// Plain-text summary printed after each channel.
pub(crate) fn console_summary(result: &ChannelAnalysisResult) -> String {
    let summary = &result.summary;
    let insights = &result.insights;
    let mut lines = vec![
        format!("== {} (@{}) ==", summary.display_name, result.handle),
        format!(
            "Subscribers: {} | Videos analysed: {} of {} | Average views: {}",
            group_thousands(summary.subscriber_count),
            result.videos.len(),
            group_thousands(summary.total_video_count),
            format_views(insights.average_views),
        ),
    ];

    bullet_section(&mut lines, "Performance patterns", &insights.performance_patterns);
    bullet_section(&mut lines, "Content themes", &insights.content_themes);
    bullet_section(
        &mut lines,
        "Optimization opportunities",
        &insights.optimization_opportunities,
    );

    lines.push("Title suggestions:".to_string());
    lines.extend(
        result
            .recommendations
            .title_suggestions
            .iter()
            .enumerate()
            .map(|(i, title)| format!("  {}. {title}", i + 1)),
    );
    lines.push(format!(
        "Success formula: {}",
        result.recommendations.success_formula
    ));

    lines.join("\n")
}

fn markdown_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    lines.push(format!("## {heading}"));
    lines.push(String::new());
    if items.is_empty() {
        lines.push("_Nothing notable._".to_string());
    } else {
        lines.extend(items.iter().map(|item| format!("- {item}")));
    }
    lines.push(String::new());
}

/// Full per-channel markdown report.
pub(crate) fn channel_markdown(result: &ChannelAnalysisResult) -> String {
    let summary = &result.summary;
    let insights = &result.insights;
    let mut lines = vec![
        format!("# Channel Analysis: {}", summary.display_name),
        String::new(),
        format!("**Handle**: @{}", result.handle),
    ];
    if let Some(description) = &result.description {
        lines.push(format!("**Description**: {description}"));
    }
    lines.extend([
        format!(
            "**Analyzed**: {}",
            result.analyzed_at.format("%Y-%m-%d %H:%M UTC")
        ),
        format!(
            "**Subscribers**: {}",
            group_thousands(summary.subscriber_count)
        ),
        format!(
            "**Videos analysed**: {} (of {} published)",
            result.videos.len(),
            group_thousands(summary.total_video_count)
        ),
        format!(
            "**Average views**: {}",
            format_views(insights.average_views)
        ),
        String::new(),
        "## Top Videos".to_string(),
        String::new(),
        "| # | Title | Views | Likes | Duration | Published |".to_string(),
        "|---|-------|-------|-------|----------|-----------|".to_string(),
    ]);

    for (i, video) in insights.top_videos.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            i + 1,
            escape_cell(&video.title),
            group_thousands(video.views),
            group_thousands(video.likes),
            VideoDuration::from_seconds(video.duration_seconds),
            video.published_at.format("%Y-%m-%d"),
        ));
    }
    lines.push(String::new());

    markdown_list(&mut lines, "Performance Patterns", &insights.performance_patterns);
    markdown_list(&mut lines, "Content Themes", &insights.content_themes);
    markdown_list(
        &mut lines,
        "Optimization Opportunities",
        &insights.optimization_opportunities,
    );

    lines.push("## Recommendations".to_string());
    lines.push(String::new());
    lines.push("### Title Suggestions".to_string());
    lines.push(String::new());
    lines.extend(
        result
            .recommendations
            .title_suggestions
            .iter()
            .enumerate()
            .map(|(i, title)| format!("{}. {title}", i + 1)),
    );
    lines.push(String::new());
    lines.push("### Success Formula".to_string());
    lines.push(String::new());
    lines.push(result.recommendations.success_formula.clone());
    lines.push(String::new());

    lines.join("\n")
}

/// Cross-channel markdown summary for a batch run.
pub(crate) fn batch_markdown(batch: &BatchRunResult, generated_at: DateTime<Utc>) -> String {
    let mut lines = vec![
        "# Batch Channel Analysis".to_string(),
        String::new(),
        format!("**Generated**: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        format!(
            "**Channels attempted**: {} | **Succeeded**: {} | **Failed**: {}",
            batch.attempted(),
            batch.succeeded.len(),
            batch.failed.len()
        ),
        String::new(),
    ];

    if let Some(aggregate) = &batch.aggregate {
        lines.extend([
            "## Aggregate".to_string(),
            String::new(),
            "| Channels | Total subscribers | Mean average views | Videos analysed |".to_string(),
            "|----------|-------------------|--------------------|-----------------|".to_string(),
            format!(
                "| {} | {} | {} | {} |",
                aggregate.channels,
                group_thousands(aggregate.total_subscribers),
                format_views(aggregate.mean_average_views),
                aggregate.total_videos_analyzed,
            ),
            String::new(),
        ]);
    }

    if !batch.succeeded.is_empty() {
        lines.extend([
            "## Channels".to_string(),
            String::new(),
            "| Channel | Handle | Subscribers | Videos | Average views | Success formula |"
                .to_string(),
            "|---------|--------|-------------|--------|---------------|-----------------|"
                .to_string(),
        ]);
        lines.extend(batch.succeeded.iter().map(|r| {
            format!(
                "| {} | @{} | {} | {} | {} | {} |",
                escape_cell(&r.summary.display_name),
                r.handle,
                group_thousands(r.summary.subscriber_count),
                r.videos.len(),
                format_views(r.insights.average_views),
                escape_cell(&r.recommendations.success_formula),
            )
        }));
        lines.push(String::new());
    }

    if !batch.failed.is_empty() {
        lines.extend([
            "## Failures".to_string(),
            String::new(),
            "| Handle | Kind | Reason |".to_string(),
            "|--------|------|--------|".to_string(),
        ]);
        lines.extend(batch.failed.iter().map(|f| {
            format!(
                "| @{} | {} | {} |",
                f.handle,
                f.kind,
                escape_cell(&f.reason)
            )
        }));
        lines.push(String::new());
    }

    lines.join("\n")
}

pub(crate) fn channel_report_path(dir: &Path, handle: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{handle}_analysis_{}.md", date.format("%Y%m%d")))
}

pub(crate) fn batch_report_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("batch_summary_{}.md", date.format("%Y%m%d")))
}

/// Write `contents` to `path`, creating parent directories as needed.
pub(crate) fn write_report(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Write one markdown report per result. A failed write is logged and the
/// remaining reports are still attempted. Returns how many were written.
pub(crate) fn write_channel_reports(dir: &Path, results: &[ChannelAnalysisResult]) -> usize {
    let mut written = 0;
    for result in results {
        let path = channel_report_path(dir, &result.handle, result.analyzed_at.date_naive());
        match write_report(&path, &channel_markdown(result)) {
            Ok(()) => written += 1,
            Err(e) => tracing::error!(
                handle = %result.handle,
                path = %path.display(),
                error = %format!("{e:#}"),
                "failed to write channel report"
            ),
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tubelens_analysis::{analyze_videos, BatchAggregate, ChannelFailure, FailureKind};
    use tubelens_core::{ChannelEntry, ChannelSummary, VideoRecord};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn video(title: &str, views: u64, duration_seconds: u64) -> VideoRecord {
        VideoRecord {
            title: title.to_owned(),
            video_id: title.to_lowercase().replace(' ', "-"),
            views,
            likes: views / 10,
            published_at: Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap(),
            duration_seconds,
            thumbnail_url: None,
        }
    }

    fn result() -> ChannelAnalysisResult {
        let mut entry = ChannelEntry::new("@gadgets");
        entry.description = Some("Consumer tech".to_owned());
        let summary = ChannelSummary {
            display_name: "Gadget Lab".to_owned(),
            subscriber_count: 1_250_000,
            total_video_count: 340,
            handle: "gadgets".to_owned(),
        };
        let videos = vec![
            video("Phone A vs Phone B | Which wins", 12_000, 5025),
            video("Phone C review", 3_000, 600),
        ];
        analyze_videos(&entry, summary, videos, now()).unwrap()
    }

    #[test]
    fn console_summary_lists_sections() {
        let text = console_summary(&result());
        assert!(text.starts_with("== Gadget Lab (@gadgets) =="));
        assert!(text.contains("Subscribers: 1,250,000 | Videos analysed: 2 of 340 | Average views: 7,500"));
        assert!(text.contains("Title suggestions:\n  1. "));
        assert!(text.contains("Success formula: Focus on "));
    }

    #[test]
    fn channel_markdown_has_escaped_top_video_table() {
        let md = channel_markdown(&result());
        assert!(md.starts_with("# Channel Analysis: Gadget Lab\n"));
        assert!(md.contains("**Description**: Consumer tech"));
        assert!(md.contains("| 1 | Phone A vs Phone B \\| Which wins | 12,000 | 1,200 | 83:45 | 2024-05-20 |"));
        assert!(md.contains("| 2 | Phone C review | 3,000 | 300 | 10:00 | 2024-05-20 |"));
        assert!(md.contains("### Success Formula"));
    }

    #[test]
    fn batch_markdown_omits_aggregate_without_successes() {
        let batch = BatchRunResult {
            succeeded: Vec::new(),
            failed: vec![ChannelFailure {
                handle: "ghost".to_owned(),
                kind: FailureKind::ChannelNotFound,
                reason: "no channel matches handle 'ghost'".to_owned(),
            }],
            aggregate: None,
        };

        let md = batch_markdown(&batch, now());
        assert!(!md.contains("## Aggregate"));
        assert!(!md.contains("## Channels"));
        assert!(md.contains("| @ghost | ChannelNotFound | no channel matches handle 'ghost' |"));
        assert!(md.contains("**Channels attempted**: 1 | **Succeeded**: 0 | **Failed**: 1"));
    }

    #[test]
    fn batch_markdown_includes_aggregate_row() {
        let succeeded = vec![result()];
        let aggregate = BatchAggregate::from_results(&succeeded);
        let batch = BatchRunResult {
            succeeded,
            failed: Vec::new(),
            aggregate,
        };

        let md = batch_markdown(&batch, now());
        assert!(md.contains("| 1 | 1,250,000 | 7,500 | 2 |"));
        assert!(md.contains("| Gadget Lab | @gadgets | 1,250,000 | 2 | 7,500 |"));
        assert!(!md.contains("## Failures"));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tubelens-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn channel_report_failures_do_not_stop_later_writes() {
        let root = scratch_dir("report-failures");
        // A plain file where the reports directory should be.
        let blocked = root.join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let results = vec![result(), result()];
        assert_eq!(write_channel_reports(&blocked, &results), 0);

        let summary = batch_report_path(&root.join("reports"), now().date_naive());
        let batch = BatchRunResult {
            aggregate: BatchAggregate::from_results(&results),
            succeeded: results,
            failed: Vec::new(),
        };
        write_report(&summary, &batch_markdown(&batch, now())).unwrap();
        assert!(summary.exists());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn channel_reports_are_written_per_result() {
        let root = scratch_dir("report-writes");
        assert_eq!(write_channel_reports(&root, &[result()]), 1);
        assert!(root.join("gadgets_analysis_20240601.md").exists());
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn report_paths_use_compact_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            channel_report_path(Path::new("reports"), "gadgets", date),
            PathBuf::from("reports/gadgets_analysis_20240601.md")
        );
        assert_eq!(
            batch_report_path(Path::new("reports"), date),
            PathBuf::from("reports/batch_summary_20240601.md")
        );
    }
}
