//! tests/settings_tests.rs
//! Lectura de configuración desde un mapa de variables.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::app_config::{Environment, LogFormat, ProviderPreference, Settings};
use crate::models::requirements_model::{RequirementsInput, StringOrList};
use crate::services::requirements_service::RequirementsService;

fn settings_from(vars: &[(&str, &str)]) -> Settings {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let settings = settings_from(&[]);
    assert_eq!(settings.port, 8000);
    assert_eq!(settings.environment, Environment::Development);
    assert_eq!(settings.worker_count(), Some(1));
    assert_eq!(settings.llm_provider, ProviderPreference::Auto);
    assert_eq!(settings.session_storage_path, PathBuf::from("sessions"));
    assert_eq!(settings.cache_duration, Duration::from_secs(3600));
    assert!(settings.enable_cost_tracking);
    assert!(!settings.rate_limit.enabled);
    assert_eq!(settings.cors_origins.len(), 4);
    assert!(!settings.allows_any_origin());
}

#[test]
fn variables_override_defaults() {
    let settings = settings_from(&[
        ("PORT", "9100"),
        ("ENVIRONMENT", "Production"),
        ("CORS_ORIGINS", "https://tux.example, *"),
        ("LLM_PROVIDER", "claude"),
        ("ANTHROPIC_API_KEY", "sk-ant"),
        ("REPLICATE_API_TOKEN", "  "),
        ("CACHE_DURATION_MINUTES", "5"),
        ("RATE_LIMIT_ENABLED", "yes"),
        ("RATE_LIMIT_REQUESTS", "30"),
        ("LOG_FORMAT", "json"),
        ("LOG_LEVEL", "DEBUG"),
    ]);
    assert_eq!(settings.port, 9100);
    assert_eq!(settings.environment, Environment::Production);
    assert_eq!(settings.worker_count(), None);
    assert!(settings.allows_any_origin());
    assert_eq!(settings.llm_provider, ProviderPreference::Anthropic);
    assert_eq!(settings.api_keys.anthropic.as_deref(), Some("sk-ant"));
    assert_eq!(settings.api_keys.replicate, None);
    assert_eq!(settings.cache_duration, Duration::from_secs(300));
    assert!(settings.rate_limit.enabled);
    assert_eq!(settings.rate_limit.max_requests, 30);
    assert_eq!(settings.log_format, LogFormat::Json);
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn invalid_values_fall_back() {
    let settings = settings_from(&[
        ("PORT", "not-a-port"),
        ("WORKERS", "0"),
        ("ENABLE_COST_TRACKING", "maybe"),
        ("MAX_CONCURRENT_REQUESTS", "0"),
        ("ANTHROPIC_API_KEY", "your_anthropic_api_key_here"),
    ]);
    assert_eq!(settings.port, 8000);
    assert_eq!(settings.workers, None);
    assert!(settings.enable_cost_tracking);
    assert_eq!(settings.max_concurrent_requests, 1);
    assert_eq!(settings.api_keys.anthropic, None);
}

#[test]
fn provider_base_urls_are_optional() {
    let settings = settings_from(&[("OPENAI_BASE_URL", "http://gateway.local/openai")]);
    assert_eq!(
        settings.base_urls.openai.as_deref(),
        Some("http://gateway.local/openai")
    );
    assert_eq!(settings.base_urls.anthropic, None);
    assert_eq!(settings.base_urls.replicate, None);
}

#[test]
fn logging_is_read_on_its_own() {
    let map: HashMap<String, String> = [("LOG_LEVEL", " WARN "), ("LOG_FORMAT", "JSON"), ("PORT", "oops")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let (level, format) = Settings::logging_from_lookup(|key| map.get(key).cloned());
    assert_eq!(level, "warn");
    assert_eq!(format, LogFormat::Json);

    let (level, format) = Settings::logging_from_lookup(|_| None);
    assert_eq!(level, Settings::default().log_level);
    assert_eq!(format, LogFormat::Text);
}

#[test]
fn comma_separated_fields_become_lists() {
    let single = StringOrList::Single("students, parents ,".to_string());
    assert_eq!(single.items(), ["students", "parents"]);
    assert_eq!(single.joined(), "students, parents");
    assert!(StringOrList::Many(vec![" ".to_string()]).is_blank());
}

#[test]
fn completeness_counts_required_and_optional_fields() {
    let service = RequirementsService::new();
    let mut req = RequirementsInput::test_new(
        "A language exchange app",
        &["travelers", "students"],
        &["practice speaking"],
        &["find partner", "schedule call"],
    );
    let report = service.validate(&req);
    assert!(report.is_valid);
    assert_eq!(report.completeness_score, 70);
    assert!(report.warnings.is_empty());

    req.demographics = Some("18-35".to_string());
    req.accessibility = Some(vec!["screen reader".to_string()]);
    req.technical_requirements = Some(vec!["offline mode".to_string()]);
    assert_eq!(service.validate(&req).completeness_score, 100);
    assert!(service.suggestions(&req).is_empty());
}

#[test]
fn processing_rejects_incomplete_requirements() {
    let service = RequirementsService::new();
    let req = RequirementsInput::test_new("", &[], &["grow"], &[]);
    let err = service.process(&req).unwrap_err();
    assert_eq!(err.to_string(), "Missing required fields: purpose, audience");
}
