//! error.rs
//! Errores de dominio y su traducción a respuestas HTTP.

use actix_web::{http::StatusCode, HttpResponse};
use serde_json::json;

#[derive(thiserror::Error, Debug)]
pub enum TuxError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidImport(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("service busy: {0}")]
    Busy(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl TuxError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TuxError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TuxError::NotFound(_) => StatusCode::NOT_FOUND,
            TuxError::InvalidImport(_) => StatusCode::BAD_REQUEST,
            TuxError::Provider(_) => StatusCode::BAD_GATEWAY,
            TuxError::Busy(_) => StatusCode::SERVICE_UNAVAILABLE,
            TuxError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response(&self) -> HttpResponse {
        detail_response(self.status_code(), self.to_string())
    }
}

/// Respuesta con el formato `{"detail": ...}` que espera el frontend.
pub fn detail_response(status: StatusCode, detail: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(json!({ "detail": detail.into() }))
}

/// Convierte un `anyhow::Error` en respuesta. Si no hay un `TuxError` en la
/// cadena, es un 500 con `prefix` delante del mensaje.
pub fn error_response(err: &anyhow::Error, prefix: &str) -> HttpResponse {
    if let Some(tux) = err.chain().find_map(|e| e.downcast_ref::<TuxError>()) {
        return tux.response();
    }
    log::error!("{}: {:?}", prefix, err);
    let detail = if prefix.is_empty() {
        err.to_string()
    } else {
        format!("{}: {}", prefix, err)
    };
    detail_response(StatusCode::INTERNAL_SERVER_ERROR, detail)
}

/// Error de deserialización del body JSON -> 422.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let detail = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        detail_response(StatusCode::UNPROCESSABLE_ENTITY, detail),
    )
    .into()
}

/// Igual que `json_error_handler` pero para query strings.
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let detail = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        detail_response(StatusCode::UNPROCESSABLE_ENTITY, detail),
    )
    .into()
}
