//! handlers/model_handler.rs
use actix_web::{web, HttpResponse};

use crate::services::model_catalog::ModelCatalog;

/// GET /api/models
pub async fn list_models_endpoint(catalog: web::Data<ModelCatalog>) -> HttpResponse {
    HttpResponse::Ok().json(catalog.available_models())
}
