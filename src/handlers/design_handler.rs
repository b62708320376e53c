//! handlers/design_handler.rs
//! Generación de especificaciones UX.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::{error_response, TuxError};
use crate::models::catalog_model::AiModel;
use crate::models::design_model::DesignModelQuery;
use crate::models::requirements_model::RequirementsInput;
use crate::services::analytics_service::AnalyticsService;
use crate::services::ux_generator::UxGenerator;

/// POST /api/generate-design
pub async fn generate_design_endpoint(
    ux_generator: web::Data<UxGenerator>,
    analytics: web::Data<AnalyticsService>,
    body: web::Json<RequirementsInput>,
) -> HttpResponse {
    let req = body.into_inner();
    log::info!("Generando diseño UX para: {}", req.purpose);

    match ux_generator.generate_specifications(&req, None).await {
        Ok(spec) => {
            record_generation(analytics.get_ref().clone(), req.purpose, "ux_specs".to_string());
            HttpResponse::Ok().json(spec)
        }
        Err(e) => error_response(&e, "Failed to generate UX specifications"),
    }
}

/// POST /api/generate-design-with-model?model=...
pub async fn generate_design_with_model_endpoint(
    ux_generator: web::Data<UxGenerator>,
    analytics: web::Data<AnalyticsService>,
    query: web::Query<DesignModelQuery>,
    body: web::Json<RequirementsInput>,
) -> HttpResponse {
    let model = match query.model.as_deref() {
        None => AiModel::Llama3_70b,
        Some(id) => match AiModel::from_id(id) {
            Some(model) => model,
            None => return TuxError::Validation(format!("Unknown model: {}", id)).response(),
        },
    };

    let req = body.into_inner();
    match ux_generator.generate_specifications(&req, Some(model)).await {
        Ok(spec) => {
            record_generation(
                analytics.get_ref().clone(),
                req.purpose,
                format!("ux_specs_{}", model.id()),
            );
            HttpResponse::Ok().json(spec)
        }
        Err(e) => error_response(
            &e,
            &format!("Failed to generate UX specifications with {}", model.id()),
        ),
    }
}

// Se registra en segundo plano; un fallo solo se loguea.
fn record_generation(analytics: AnalyticsService, purpose: String, kind: String) {
    tokio::spawn(async move {
        log::info!("Evento de generación: {} para: {}", kind, purpose);
        let metadata = json!({ "purpose": purpose, "kind": kind });
        if let Err(e) = analytics
            .track_event("design_generated", None, Some(&metadata))
            .await
        {
            log::error!("No se pudo registrar el evento de generación: {:?}", e);
        }
    });
}
