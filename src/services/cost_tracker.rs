//! services/cost_tracker.rs
//! Registro en memoria del uso de proveedores y estimación de costos.

use std::{collections::BTreeMap, sync::Arc};

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::error::TuxError;
use crate::models::cost_model::{
    CostSuggestion, DailyCostSummary, MonthlyProjection, OperationCost, ServiceType, TrackerStats,
    UsageEvent,
};

/// Tarifa por 1K tokens cuando el modelo no está en la tabla
const DEFAULT_RATE_PER_1K: f64 = 0.0002;
/// Por encima de esta cantidad de eventos se purgan los viejos
const MAX_EVENTS_BEFORE_CLEANUP: usize = 10_000;
const RETENTION_DAYS: i64 = 30;
/// Costos mayores a un centavo se registran en el log
const LOG_COST_THRESHOLD: f64 = 0.01;

const EXPENSIVE_CALL_COST: f64 = 0.05;
const SLOW_RESPONSE_MS: u64 = 10_000;

/// Datos de una llamada a un proveedor.
#[derive(Debug, Clone)]
pub struct UsageRecord<'a> {
    pub service: ServiceType,
    pub model: &'a str,
    pub operation: &'a str,
    pub tokens_used: u64,
    pub response_time_ms: u64,
    pub user_session: Option<&'a str>,
    pub success: bool,
}

#[derive(Clone)]
pub struct CostTracker {
    enabled: bool,
    events: Arc<RwLock<Vec<UsageEvent>>>,
}

impl CostTracker {
    pub fn new(enabled: bool) -> Self {
        log::info!(
            "Cost tracking {}",
            if enabled { "enabled" } else { "disabled" }
        );
        CostTracker {
            enabled,
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Registra el uso y devuelve el costo estimado (0 si está deshabilitado).
    pub async fn track_usage(&self, record: UsageRecord<'_>) -> f64 {
        self.track_usage_at(record, Utc::now()).await
    }

    pub async fn track_usage_at(&self, record: UsageRecord<'_>, timestamp: DateTime<Utc>) -> f64 {
        if !self.enabled {
            return 0.0;
        }

        let estimated_cost = calculate_cost(record.service, record.model, record.tokens_used);
        if estimated_cost > LOG_COST_THRESHOLD {
            log::info!(
                "API Usage: {}/{} - {} tokens, ${:.4}, {}ms - {}",
                record.service.as_str(),
                record.model,
                record.tokens_used,
                estimated_cost,
                record.response_time_ms,
                record.operation
            );
        }

        let mut events = self.events.write().await;
        events.push(UsageEvent {
            timestamp,
            service: record.service,
            model: record.model.to_string(),
            operation: record.operation.to_string(),
            tokens_used: record.tokens_used,
            estimated_cost,
            user_session: record.user_session.map(str::to_string),
            success: record.success,
            response_time_ms: record.response_time_ms,
        });

        if events.len() > MAX_EVENTS_BEFORE_CLEANUP {
            let cutoff = Utc::now() - Duration::days(RETENTION_DAYS);
            let before = events.len();
            events.retain(|e| e.timestamp >= cutoff);
            let cleaned = before - events.len();
            if cleaned > 0 {
                log::info!("Cleaned up {} old usage events", cleaned);
            }
        }

        estimated_cost
    }

    /// Resumen de un día UTC (`YYYY-MM-DD`); sin fecha usa el día actual.
    pub async fn daily_summary(&self, date: Option<&str>) -> Result<DailyCostSummary> {
        let day = match date {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                TuxError::Validation("Invalid date format. Use YYYY-MM-DD".to_string())
            })?,
            None => Utc::now().date_naive(),
        };

        let events = self.events.read().await;
        let daily: Vec<&UsageEvent> = events
            .iter()
            .filter(|e| e.timestamp.date_naive() == day)
            .collect();

        let total_cost: f64 = daily.iter().map(|e| e.estimated_cost).sum();
        let successful_requests = daily.iter().filter(|e| e.success).count();

        let timed: Vec<u64> = daily
            .iter()
            .map(|e| e.response_time_ms)
            .filter(|ms| *ms > 0)
            .collect();
        let average_response_time = if timed.is_empty() {
            0.0
        } else {
            timed.iter().sum::<u64>() as f64 / timed.len() as f64
        };

        let mut by_operation: BTreeMap<String, f64> = BTreeMap::new();
        let mut cost_by_service: BTreeMap<String, f64> = BTreeMap::new();
        for e in &daily {
            *by_operation.entry(e.operation.clone()).or_default() += e.estimated_cost;
            *cost_by_service
                .entry(e.service.as_str().to_string())
                .or_default() += e.estimated_cost;
        }

        let mut top_operations: Vec<OperationCost> = by_operation
            .into_iter()
            .map(|(operation, cost)| OperationCost {
                percentage: if total_cost > 0.0 {
                    cost / total_cost * 100.0
                } else {
                    0.0
                },
                operation,
                cost,
            })
            .collect();
        top_operations.sort_by(|a, b| b.cost.total_cmp(&a.cost));

        Ok(DailyCostSummary {
            date: day.format("%Y-%m-%d").to_string(),
            total_cost,
            total_requests: daily.len(),
            successful_requests,
            average_response_time,
            top_operations,
            cost_by_service,
        })
    }

    pub async fn monthly_projection(&self) -> MonthlyProjection {
        self.monthly_projection_at(Utc::now()).await
    }

    pub async fn monthly_projection_at(&self, now: DateTime<Utc>) -> MonthlyProjection {
        let days_elapsed = now.day();
        let days_in_month = days_in_month(now.year(), now.month());
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .unwrap_or(now);

        let events = self.events.read().await;
        let month: Vec<&UsageEvent> = events
            .iter()
            .filter(|e| e.timestamp >= month_start && e.timestamp <= now)
            .collect();

        let current_month_cost: f64 = month.iter().map(|e| e.estimated_cost).sum();
        let daily_average = current_month_cost / days_elapsed as f64;

        let projection_confidence = if month.is_empty() {
            "low"
        } else if days_elapsed >= 7 {
            "high"
        } else if days_elapsed >= 3 {
            "medium"
        } else {
            "low"
        };

        MonthlyProjection {
            current_month_cost,
            projected_month_cost: daily_average * days_in_month as f64,
            daily_average,
            days_elapsed,
            days_in_month,
            total_requests: month.len(),
            successful_requests: month.iter().filter(|e| e.success).count(),
            projection_confidence: projection_confidence.to_string(),
        }
    }

    pub async fn optimization_suggestions(&self) -> Vec<CostSuggestion> {
        self.optimization_suggestions_at(Utc::now()).await
    }

    /// Analiza los últimos 7 días.
    pub async fn optimization_suggestions_at(&self, now: DateTime<Utc>) -> Vec<CostSuggestion> {
        let week_ago = now - Duration::days(7);
        let events = self.events.read().await;
        let recent: Vec<&UsageEvent> = events.iter().filter(|e| e.timestamp >= week_ago).collect();

        if recent.is_empty() {
            return vec![CostSuggestion::note("info", "No recent usage to analyze")];
        }

        let total = recent.len() as f64;
        let total_cost: f64 = recent.iter().map(|e| e.estimated_cost).sum();
        let mut suggestions = Vec::new();

        let expensive: Vec<&&UsageEvent> = recent
            .iter()
            .filter(|e| e.estimated_cost > EXPENSIVE_CALL_COST)
            .collect();
        if !expensive.is_empty() {
            let expensive_cost: f64 = expensive.iter().map(|e| e.estimated_cost).sum();
            let percentage = if total_cost > 0.0 {
                expensive_cost / total_cost * 100.0
            } else {
                0.0
            };
            suggestions.push(CostSuggestion {
                kind: "optimization".to_string(),
                priority: Some(if percentage > 50.0 { "high" } else { "medium" }.to_string()),
                message: format!(
                    "High-cost API calls account for {:.1}% of expenses",
                    percentage
                ),
                suggestion: Some(
                    "Consider using smaller models for simple tasks or implement response caching"
                        .to_string(),
                ),
                potential_savings: Some(format!("${:.2}/week", expensive_cost * 0.3)),
                impact: None,
            });
        }

        let failed: Vec<&&UsageEvent> = recent.iter().filter(|e| !e.success).collect();
        if !failed.is_empty() {
            let failure_rate = failed.len() as f64 / total * 100.0;
            let wasted: f64 = failed.iter().map(|e| e.estimated_cost).sum();
            suggestions.push(CostSuggestion {
                kind: "reliability".to_string(),
                priority: Some(if failure_rate > 10.0 { "high" } else { "medium" }.to_string()),
                message: format!(
                    "API failure rate: {:.1}% (${:.3} wasted)",
                    failure_rate, wasted
                ),
                suggestion: Some("Implement better retry logic and fallback models".to_string()),
                potential_savings: Some(format!("${:.2}/month", wasted * 4.0)),
                impact: None,
            });
        }

        let slow = recent
            .iter()
            .filter(|e| e.response_time_ms > SLOW_RESPONSE_MS)
            .count();
        if slow > 0 {
            suggestions.push(CostSuggestion {
                kind: "performance".to_string(),
                priority: Some("medium".to_string()),
                message: format!(
                    "{:.1}% of requests are slow (>10s)",
                    slow as f64 / total * 100.0
                ),
                suggestion: Some(
                    "Consider request timeout optimization or faster models".to_string(),
                ),
                potential_savings: None,
                impact: Some("Improved user experience".to_string()),
            });
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for e in &recent {
            *counts.entry(e.operation.as_str()).or_default() += 1;
        }
        if let Some((operation, count)) = counts.into_iter().max_by_key(|(_, c)| *c) {
            if count as f64 > total * 0.6 {
                suggestions.push(CostSuggestion {
                    kind: "caching".to_string(),
                    priority: Some("medium".to_string()),
                    message: format!(
                        "'{}' accounts for {:.1}% of usage",
                        operation,
                        count as f64 / total * 100.0
                    ),
                    suggestion: Some("Implement aggressive caching for this operation".to_string()),
                    potential_savings: Some("20-40% cost reduction".to_string()),
                    impact: None,
                });
            }
        }

        if suggestions.is_empty() {
            suggestions.push(CostSuggestion::note(
                "success",
                "Usage patterns look optimized!",
            ));
        }
        suggestions
    }

    pub async fn current_stats(&self) -> TrackerStats {
        let total_events = self.events.read().await.len();
        TrackerStats {
            total_events,
            tracking_enabled: self.enabled,
            supported_services: ServiceType::ALL
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            memory_usage: format!("{} bytes (approx)", total_events * 200),
        }
    }
}

/// Costo estimado en dólares según la tabla de tarifas por 1K tokens.
pub fn calculate_cost(service: ServiceType, model: &str, tokens: u64) -> f64 {
    tokens as f64 / 1000.0 * rate_per_1k(service, model)
}

fn rate_per_1k(service: ServiceType, model: &str) -> f64 {
    let rate = match (service, model) {
        (ServiceType::TogetherAi, "meta-llama/Llama-3-70b-chat-hf") => Some(0.0008),
        (ServiceType::TogetherAi, "meta-llama/Llama-3-8b-chat-hf") => Some(0.0002),
        (ServiceType::Huggingface, "mistralai/Mistral-7B-Instruct-v0.1") => Some(0.0003),
        (ServiceType::Huggingface, "mistralai/Mixtral-8x7B-Instruct-v0.1") => Some(0.0006),
        (ServiceType::Huggingface, "microsoft/Phi-3-mini-4k-instruct") => Some(0.0001),
        (ServiceType::Huggingface, "Qwen/Qwen2-72B-Instruct") => Some(0.0008),
        (ServiceType::Openai, "gpt-3.5-turbo") => Some(0.0015),
        (ServiceType::Openai, "gpt-4") => Some(0.03),
        // Anthropic versiona por fecha: se compara el prefijo
        (ServiceType::Anthropic, m) if m.starts_with("claude-3-5-sonnet") => Some(0.009),
        (ServiceType::Anthropic, m) if m.starts_with("claude-3-haiku") => Some(0.00075),
        _ => None,
    };
    rate.unwrap_or(DEFAULT_RATE_PER_1K)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(start), Some(end)) => (end - start).num_days() as u32,
        _ => 30,
    }
}
