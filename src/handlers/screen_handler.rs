//! handlers/screen_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::error::error_response;
use crate::models::screen_model::{
    ImageVariationsQuery, ImageVariationsRequest, ScreenGenerationRequest,
};
use crate::services::screen_service::{self, ScreenService};

/// POST /api/generate-screens
pub async fn generate_screens_endpoint(
    screen_service: web::Data<ScreenService>,
    body: web::Json<ScreenGenerationRequest>,
) -> HttpResponse {
    match screen_service.generate_screens(&body).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(&e, ""),
    }
}

/// GET /api/screens/{screen_id}/html
pub async fn screen_html_endpoint(path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(screen_service::screen_html(&path.into_inner()))
}

/// POST /api/screens/{screen_id}/update-element
pub async fn update_element_endpoint(
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> HttpResponse {
    let changes = Value::Object(body.into_inner());
    HttpResponse::Ok().json(screen_service::update_element(&path.into_inner(), changes))
}

/// POST /api/generate-image-variations?screen_id=...
pub async fn image_variations_endpoint(
    screen_service: web::Data<ScreenService>,
    query: web::Query<ImageVariationsQuery>,
    body: web::Json<ImageVariationsRequest>,
) -> HttpResponse {
    let req = body.into_inner();
    let variations = screen_service
        .image_variations(&req.screen_data, req.styles.as_deref())
        .await;
    let total = variations.len();
    HttpResponse::Ok().json(json!({
        "screen_id": query.screen_id,
        "variations": variations,
        "total_variations": total,
    }))
}
