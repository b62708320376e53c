//! models/cost_model.rs
//! Eventos de uso de APIs externas y los reportes que se derivan de ellos.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    TogetherAi,
    Huggingface,
    Openai,
    Replicate,
    Anthropic,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::TogetherAi,
        ServiceType::Huggingface,
        ServiceType::Openai,
        ServiceType::Replicate,
        ServiceType::Anthropic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::TogetherAi => "together_ai",
            ServiceType::Huggingface => "huggingface",
            ServiceType::Openai => "openai",
            ServiceType::Replicate => "replicate",
            ServiceType::Anthropic => "anthropic",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageEvent {
    pub timestamp: DateTime<Utc>,
    pub service: ServiceType,
    pub model: String,
    pub operation: String,
    pub tokens_used: u64,
    pub estimated_cost: f64,
    pub user_session: Option<String>,
    pub success: bool,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationCost {
    pub operation: String,
    pub cost: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyCostSummary {
    pub date: String,
    pub total_cost: f64,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub average_response_time: f64,
    pub top_operations: Vec<OperationCost>,
    pub cost_by_service: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyProjection {
    pub current_month_cost: f64,
    pub projected_month_cost: f64,
    pub daily_average: f64,
    pub days_elapsed: u32,
    pub days_in_month: u32,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub projection_confidence: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl CostSuggestion {
    pub fn note(kind: &str, message: &str) -> Self {
        CostSuggestion {
            kind: kind.to_string(),
            priority: None,
            message: message.to_string(),
            suggestion: None,
            potential_savings: None,
            impact: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackerStats {
    pub total_events: usize,
    pub tracking_enabled: bool,
    pub supported_services: Vec<String>,
    pub memory_usage: String,
}

#[derive(Debug, Deserialize)]
pub struct DailyCostQuery {
    pub date: Option<String>,
}
