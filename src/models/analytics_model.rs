//! models/analytics_model.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct TrackEventRequest {
    pub event: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Fila de `analytics_events` con `metadata` ya parseado.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsEvent {
    pub id: String,
    pub event: String,
    pub user_id: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<i64>,
}
