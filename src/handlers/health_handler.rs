//! handlers/health_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::services::health_service::HealthService;

/// GET /
pub async fn root_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "TUX Backend API is running",
        "status": "ok",
    }))
}

/// GET /health y /api/health
pub async fn health_endpoint(health: web::Data<HealthService>) -> HttpResponse {
    HttpResponse::Ok().json(health.report())
}
