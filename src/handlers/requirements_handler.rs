//! handlers/requirements_handler.rs
use actix_web::{web, HttpResponse};

use crate::error::error_response;
use crate::models::requirements_model::{ProcessRequirementsResponse, RequirementsInput};
use crate::services::requirements_service::RequirementsService;

/// POST /api/process-requirements
pub async fn process_requirements_endpoint(
    requirements_service: web::Data<RequirementsService>,
    body: web::Json<RequirementsInput>,
) -> HttpResponse {
    let req = body.into_inner();
    match requirements_service.process(&req) {
        Ok(data) => HttpResponse::Ok().json(ProcessRequirementsResponse {
            status: "processed".to_string(),
            data,
            suggestions: requirements_service.suggestions(&req),
        }),
        Err(e) => error_response(&e, "Failed to process requirements"),
    }
}

/// POST /api/validate-requirements
/// Siempre 200; el reporte indica si es válido.
pub async fn validate_requirements_endpoint(
    requirements_service: web::Data<RequirementsService>,
    body: web::Json<RequirementsInput>,
) -> HttpResponse {
    HttpResponse::Ok().json(requirements_service.validate(&body))
}
