//! models/health_model.rs

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AiServicesStatus {
    pub llm_service: String,
    pub vision_service: String,
    pub huggingface: String,
    pub replicate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub ai_services: AiServicesStatus,
}
