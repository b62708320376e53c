//! services/health_service.rs

use std::time::Instant;

use chrono::Utc;

use crate::models::health_model::{AiServicesStatus, HealthResponse};

#[derive(Clone, Debug)]
pub struct HealthService {
    started_at: Instant,
    services: AiServicesStatus,
}

impl HealthService {
    pub fn new(llm_available: bool, vision_available: bool, huggingface: bool) -> Self {
        let status = |ok: bool, otherwise: &str| {
            if ok {
                "available".to_string()
            } else {
                otherwise.to_string()
            }
        };
        HealthService {
            started_at: Instant::now(),
            services: AiServicesStatus {
                llm_service: status(llm_available, "fallback"),
                vision_service: status(vision_available, "fallback"),
                huggingface: status(huggingface, "not_configured"),
                replicate: status(vision_available, "not_configured"),
            },
        }
    }

    pub fn report(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
            ai_services: self.services.clone(),
        }
    }
}
