//! handlers/cost_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::error_response;
use crate::models::cost_model::DailyCostQuery;
use crate::services::cost_tracker::CostTracker;

/// GET /api/costs/daily?date=YYYY-MM-DD
pub async fn daily_costs_endpoint(
    cost_tracker: web::Data<CostTracker>,
    query: web::Query<DailyCostQuery>,
) -> HttpResponse {
    match cost_tracker.daily_summary(query.date.as_deref()).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e, "Failed to build daily summary"),
    }
}

/// GET /api/costs/projection
pub async fn cost_projection_endpoint(cost_tracker: web::Data<CostTracker>) -> HttpResponse {
    HttpResponse::Ok().json(cost_tracker.monthly_projection().await)
}

/// GET /api/costs/suggestions
pub async fn cost_suggestions_endpoint(cost_tracker: web::Data<CostTracker>) -> HttpResponse {
    let suggestions = cost_tracker.optimization_suggestions().await;
    HttpResponse::Ok().json(json!({ "suggestions": suggestions }))
}

/// GET /api/costs/stats
pub async fn cost_stats_endpoint(cost_tracker: web::Data<CostTracker>) -> HttpResponse {
    HttpResponse::Ok().json(cost_tracker.current_stats().await)
}
