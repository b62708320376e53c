//! tests/cost_tests.rs
//! Pruebas de `CostTracker` y de la tabla de tarifas.

use chrono::{Duration, TimeZone, Utc};

use crate::models::cost_model::ServiceType;
use crate::services::cost_tracker::{calculate_cost, days_in_month, CostTracker, UsageRecord};

fn record<'a>(operation: &'a str, tokens: u64, success: bool) -> UsageRecord<'a> {
    UsageRecord {
        service: ServiceType::TogetherAi,
        model: "meta-llama/Llama-3-70b-chat-hf",
        operation,
        tokens_used: tokens,
        response_time_ms: 1200,
        user_session: None,
        success,
    }
}

#[test]
fn cost_uses_model_rate_or_default() {
    let llama = calculate_cost(ServiceType::TogetherAi, "meta-llama/Llama-3-70b-chat-hf", 2000);
    assert!((llama - 0.0016).abs() < 1e-12);

    let unknown = calculate_cost(ServiceType::Huggingface, "some/other-model", 1000);
    assert!((unknown - 0.0002).abs() < 1e-12);

    let claude = calculate_cost(ServiceType::Anthropic, "claude-3-haiku-20240307", 1000);
    assert!((claude - 0.00075).abs() < 1e-12);

    assert_eq!(calculate_cost(ServiceType::Replicate, "stable-diffusion-xl", 0), 0.0);
}

#[test]
fn month_lengths_include_leap_years_and_december() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2025, 2), 28);
    assert_eq!(days_in_month(2026, 12), 31);
    assert_eq!(days_in_month(2026, 4), 30);
}

#[actix_rt::test]
async fn disabled_tracker_records_nothing() {
    let tracker = CostTracker::new(false);
    let cost = tracker.track_usage(record("ux_generation", 5000, true)).await;
    assert_eq!(cost, 0.0);
    let stats = tracker.current_stats().await;
    assert_eq!(stats.total_events, 0);
    assert!(!stats.tracking_enabled);
}

#[actix_rt::test]
async fn daily_summary_groups_by_operation_and_service() {
    let tracker = CostTracker::new(true);
    let day = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    tracker
        .track_usage_at(record("ux_generation", 3000, true), day)
        .await;
    tracker
        .track_usage_at(record("question_generation", 1000, false), day)
        .await;
    tracker
        .track_usage_at(record("ux_generation", 1000, true), day - Duration::days(1))
        .await;

    let summary = tracker.daily_summary(Some("2026-03-10")).await.unwrap();
    assert_eq!(summary.date, "2026-03-10");
    assert_eq!(summary.total_requests, 2);
    assert_eq!(summary.successful_requests, 1);
    assert!((summary.average_response_time - 1200.0).abs() < 1e-9);
    assert_eq!(summary.top_operations[0].operation, "ux_generation");
    assert!((summary.top_operations[0].percentage - 75.0).abs() < 1e-9);
    assert!(summary.cost_by_service.contains_key("together_ai"));
}

#[actix_rt::test]
async fn daily_summary_rejects_bad_dates() {
    let tracker = CostTracker::new(true);
    let err = tracker.daily_summary(Some("2026/03/10")).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid date format. Use YYYY-MM-DD");
}

#[actix_rt::test]
async fn projection_scales_daily_average_to_month() {
    let tracker = CostTracker::new(true);
    let now = Utc.with_ymd_and_hms(2026, 12, 10, 18, 0, 0).unwrap();
    // 0.008 USD en el mes
    tracker
        .track_usage_at(record("ux_generation", 10_000, true), now - Duration::days(2))
        .await;

    let projection = tracker.monthly_projection_at(now).await;
    assert_eq!(projection.days_elapsed, 10);
    assert_eq!(projection.days_in_month, 31);
    assert_eq!(projection.total_requests, 1);
    assert!((projection.daily_average - 0.0008).abs() < 1e-12);
    assert!((projection.projected_month_cost - 0.0248).abs() < 1e-12);
    assert_eq!(projection.projection_confidence, "high");
}

#[actix_rt::test]
async fn suggestions_flag_failures_and_dominant_operations() {
    let tracker = CostTracker::new(true);
    let now = Utc.with_ymd_and_hms(2026, 5, 20, 9, 0, 0).unwrap();

    assert_eq!(
        tracker.optimization_suggestions_at(now).await[0].message,
        "No recent usage to analyze"
    );

    for _ in 0..4 {
        tracker
            .track_usage_at(record("html_generation", 1000, true), now - Duration::hours(1))
            .await;
    }
    tracker
        .track_usage_at(record("ux_generation", 1000, false), now - Duration::hours(2))
        .await;
    // fuera de la ventana de 7 días
    tracker
        .track_usage_at(record("ux_generation", 1000, false), now - Duration::days(9))
        .await;

    let suggestions = tracker.optimization_suggestions_at(now).await;
    let kinds: Vec<&str> = suggestions.iter().map(|s| s.kind.as_str()).collect();
    assert!(kinds.contains(&"reliability"));
    assert!(kinds.contains(&"caching"));
    assert!(!kinds.contains(&"optimization"));

    let reliability = suggestions
        .iter()
        .find(|s| s.kind == "reliability")
        .unwrap();
    assert_eq!(reliability.priority.as_deref(), Some("high"));
    assert!(reliability.message.starts_with("API failure rate: 20.0%"));
}

#[actix_rt::test]
async fn healthy_usage_reports_optimized() {
    let tracker = CostTracker::new(true);
    let now = Utc.with_ymd_and_hms(2026, 5, 20, 9, 0, 0).unwrap();
    for operation in ["ux_generation", "html_generation", "question_generation"] {
        tracker
            .track_usage_at(record(operation, 500, true), now - Duration::hours(3))
            .await;
    }

    let suggestions = tracker.optimization_suggestions_at(now).await;
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].kind, "success");
    assert_eq!(suggestions[0].message, "Usage patterns look optimized!");
}
