//! handlers/session_handler.rs
//! CRUD de sesiones guardadas y su export/import.

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use crate::error::{error_response, TuxError};
use crate::models::session_model::{
    CreateSessionRequest, ListSessionsQuery, SessionListResponse, UpdateSessionRequest,
};
use crate::services::session_service::{session_data, SessionService, DEFAULT_LIST_LIMIT};

fn session_not_found() -> HttpResponse {
    TuxError::NotFound("Session not found".to_string()).response()
}

/// POST /api/sessions
pub async fn create_session_endpoint(
    session_service: web::Data<SessionService>,
    body: web::Json<CreateSessionRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let data = session_data(req.requirements, req.ux_specs, req.screens);
    match session_service.create(data).await {
        Ok(session_id) => HttpResponse::Ok().json(json!({
            "session_id": session_id,
            "message": "Session created successfully",
        })),
        Err(e) => error_response(&e, "Failed to create session"),
    }
}

/// GET /api/sessions?limit=10
pub async fn list_sessions_endpoint(
    session_service: web::Data<SessionService>,
    query: web::Query<ListSessionsQuery>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    match session_service.list(limit).await {
        Ok(sessions) => HttpResponse::Ok().json(SessionListResponse {
            total: sessions.len(),
            sessions,
        }),
        Err(e) => error_response(&e, "Failed to list sessions"),
    }
}

/// GET /api/sessions/{id}
pub async fn get_session_endpoint(
    session_service: web::Data<SessionService>,
    path: web::Path<String>,
) -> HttpResponse {
    match session_service.get(&path.into_inner()).await {
        Ok(Some(record)) => HttpResponse::Ok().json(record),
        Ok(None) => session_not_found(),
        Err(e) => error_response(&e, "Failed to get session"),
    }
}

/// PUT /api/sessions/{id}
pub async fn update_session_endpoint(
    session_service: web::Data<SessionService>,
    path: web::Path<String>,
    body: web::Json<UpdateSessionRequest>,
) -> HttpResponse {
    let session_id = path.into_inner();
    match session_service
        .update_fields(&session_id, body.into_inner())
        .await
    {
        Ok(true) => HttpResponse::Ok().json(json!({
            "session_id": session_id,
            "message": "Session updated successfully",
        })),
        Ok(false) => session_not_found(),
        Err(e) => error_response(&e, "Failed to update session"),
    }
}

/// DELETE /api/sessions/{id}
pub async fn delete_session_endpoint(
    session_service: web::Data<SessionService>,
    path: web::Path<String>,
) -> HttpResponse {
    match session_service.delete(&path.into_inner()).await {
        Ok(true) => HttpResponse::Ok().json(json!({ "message": "Session deleted successfully" })),
        Ok(false) => session_not_found(),
        Err(e) => error_response(&e, "Failed to delete session"),
    }
}

/// GET /api/sessions/{id}/export
pub async fn export_session_endpoint(
    session_service: web::Data<SessionService>,
    path: web::Path<String>,
) -> HttpResponse {
    match session_service.export(&path.into_inner()).await {
        Ok(Some(doc)) => HttpResponse::Ok().json(doc),
        Ok(None) => session_not_found(),
        Err(e) => error_response(&e, "Failed to export session"),
    }
}

/// POST /api/sessions/import
pub async fn import_session_endpoint(
    session_service: web::Data<SessionService>,
    body: web::Json<Value>,
) -> HttpResponse {
    match session_service.import(&body).await {
        Ok(Some(session_id)) => HttpResponse::Ok().json(json!({
            "session_id": session_id,
            "message": "Session imported successfully",
        })),
        Ok(None) => TuxError::InvalidImport("Invalid export data".to_string()).response(),
        Err(e) => error_response(&e, "Failed to import session"),
    }
}
