//! models/session_model.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contenido de `{id}.json` en el directorio de sesiones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIndexEntry {
    pub created_at: String,
    pub updated_at: String,
    pub app_idea: String,
}

/// `sessions_metadata.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionIndex {
    #[serde(default)]
    pub sessions: HashMap<String, SessionIndexEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub app_idea: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    pub export_version: String,
    pub exported_at: String,
    pub session: SessionRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub requirements: Map<String, Value>,
    #[serde(default)]
    pub ux_specs: Option<Value>,
    #[serde(default)]
    pub screens: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub requirements: Option<Map<String, Value>>,
    #[serde(default)]
    pub ux_specs: Option<Value>,
    #[serde(default)]
    pub screens: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: usize,
}
