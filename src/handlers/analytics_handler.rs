//! handlers/analytics_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::error_response;
use crate::models::analytics_model::{EventsQuery, TrackEventRequest};
use crate::services::analytics_service::{AnalyticsService, DEFAULT_EVENTS_LIMIT};

/// POST /api/analytics/track
pub async fn track_event_endpoint(
    analytics: web::Data<AnalyticsService>,
    body: web::Json<TrackEventRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    match analytics
        .track_event(&req.event, req.user_id.as_deref(), req.metadata.as_ref())
        .await
    {
        Ok(event_id) => HttpResponse::Ok().json(json!({
            "message": "Event tracked successfully",
            "event_id": event_id,
        })),
        Err(e) => error_response(&e, "Failed to track event"),
    }
}

/// GET /api/analytics/events?limit=100
pub async fn list_events_endpoint(
    analytics: web::Data<AnalyticsService>,
    query: web::Query<EventsQuery>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(DEFAULT_EVENTS_LIMIT);
    match analytics.recent_events(limit).await {
        Ok(events) => HttpResponse::Ok().json(json!({ "events": events })),
        Err(e) => error_response(&e, "Failed to read events"),
    }
}
