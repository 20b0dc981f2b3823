use super::*;
use crate::test_support::{now, video, videos_with_views};

#[test]
fn empty_set_is_an_error() {
    assert_eq!(compose_insights(&[], now()), Err(EmptySetError));
}

#[test]
fn lift_statement_reports_rounded_percentage() {
    let mut views = vec![1000; 10];
    views.extend([10, 20]);
    let insights = compose_insights(&videos_with_views(&views), now()).unwrap();

    // avg = 10030 / 12 ≈ 835.8; lift = round(19.64) = 20
    assert_eq!(
        insights.performance_patterns[0],
        "Top-performing videos average 1,000 views, 20% above the channel average of 836"
    );
}

#[test]
fn small_uniform_channel_has_no_lift_statement() {
    // Top 10 and the full set coincide for fewer than ten videos, so with no
    // variance there is nothing to compare.
    let insights = compose_insights(&videos_with_views(&[700, 700, 700]), now()).unwrap();
    assert!(insights
        .performance_patterns
        .iter()
        .all(|line| !line.starts_with("Top-performing videos average")));
}

#[test]
fn small_varied_channel_also_has_no_lift_statement() {
    // Fewer than ten videos: the "top 10" mean is the full-set mean.
    let insights = compose_insights(&videos_with_views(&[50, 5000, 700]), now()).unwrap();
    assert!(!insights.performance_patterns[0].starts_with("Top-performing"));
}

#[test]
fn duration_and_recency_statements() {
    // Ten-minute videos a week apart: ages 0, 7, 14, 21, 28 fall in the window.
    let insights =
        compose_insights(&videos_with_views(&[100, 100, 100, 100, 100, 100, 100]), now()).unwrap();
    assert_eq!(
        insights.performance_patterns,
        [
            "Average video length is 10.0 minutes",
            "Active upload schedule: 5 videos published in the last 30 days",
        ]
    );
}

#[test]
fn recency_statement_needs_three_recent_uploads() {
    let videos = vec![video("Alpha", 10, 0, 2), video("Beta", 10, 0, 5), video("Gamma", 10, 0, 90)];
    let insights = compose_insights(&videos, now()).unwrap();
    assert!(insights.performance_patterns.is_empty());
}

#[test]
fn breakout_video_is_quoted_with_truncated_title() {
    let mut videos = videos_with_views(&[100; 9]);
    videos.push(video(
        "This extraordinarily long title keeps going well past fifty characters",
        10_000,
        600,
        3,
    ));
    let insights = compose_insights(&videos, now()).unwrap();

    assert_eq!(
        insights.optimization_opportunities[0],
        "Replicate the elements of \"This extraordinarily long title keeps going well p...\" (10,000 views, 9.2x the channel average)"
    );
}

#[test]
fn no_breakout_at_or_below_five_times_average() {
    let insights = compose_insights(&videos_with_views(&[100, 100, 100, 100, 5000]), now()).unwrap();
    assert!(insights
        .optimization_opportunities
        .iter()
        .all(|line| !line.starts_with("Replicate")));
}

#[test]
fn underperformers_flagged_from_three() {
    let videos = videos_with_views(&[1640, 2000, 10, 700, 20, 1500, 600, 30, 2500]);
    let insights = compose_insights(&videos, now()).unwrap();
    assert!(insights.optimization_opportunities.contains(
        &"3 of the 5 lowest-viewed videos drew under half the average views; revisit their topics and thumbnails"
            .to_string()
    ));
}

#[test]
fn tutorial_keyword_flagged() {
    let videos = vec![
        video("Rust tutorial part one", 100, 600, 1),
        video("Async tutorial deep dive", 120, 600, 2),
        video("Release notes", 90, 600, 3),
    ];
    let insights = compose_insights(&videos, now()).unwrap();
    assert!(insights
        .optimization_opportunities
        .iter()
        .any(|line| line.starts_with("Tutorial content recurs")));
}

#[test]
fn theme_lines_list_keywords() {
    let videos = vec![
        video("Drone flight basics", 900, 600, 1),
        video("Drone flight at night", 800, 600, 2),
        video("Camera settings basics", 100, 600, 3),
        video("Camera flight mode", 50, 600, 4),
    ];
    let insights = compose_insights(&videos, now()).unwrap();
    assert_eq!(
        insights.content_themes,
        [
            "Recurring title keywords: flight, drone, basics, camera",
            "Top-performing titles emphasize: flight, drone, basics, camera",
        ]
    );
}

#[test]
fn no_keywords_means_no_theme_lines() {
    let videos = vec![video("Alpha", 10, 0, 1), video("Beta", 20, 0, 2)];
    let insights = compose_insights(&videos, now()).unwrap();
    assert!(insights.content_themes.is_empty());
}

#[test]
fn top_videos_bounded_and_sorted() {
    let views: Vec<u64> = (1..=13).map(|v| v * 10).collect();
    let insights = compose_insights(&videos_with_views(&views), now()).unwrap();
    assert_eq!(insights.top_videos.len(), 10);
    assert_eq!(insights.top_videos[0].views, 130);
    assert!(insights.top_videos.windows(2).all(|w| w[0].views >= w[1].views));
}

#[test]
fn composition_is_deterministic() {
    let videos = videos_with_views(&[5, 80, 3, 900, 45, 45, 2, 1200, 8, 19, 33, 71]);
    let first = compose_insights(&videos, now()).unwrap();
    let second = compose_insights(&videos, now()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn thousands_grouping() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
    assert_eq!(group_thousands(1_234_567), "1,234,567");
    assert_eq!(format_views(835.83), "836");
}
