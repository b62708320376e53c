//! handlers/export_handler.rs
//! Descargas de HTML, JSON y SVG.

use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{mime, web, HttpRequest, HttpResponse};

use crate::error::error_response;
use crate::models::export_model::{ExportFormat, ExportRequest, SingleScreenExportRequest};
use crate::services::export_service::{sanitize_filename, ExportService};

fn disposition(kind: DispositionType, filename: String) -> ContentDisposition {
    ContentDisposition {
        disposition: kind,
        parameters: vec![DispositionParam::Filename(filename)],
    }
}

fn mime_for(format: ExportFormat) -> mime::Mime {
    match format {
        ExportFormat::Html => mime::TEXT_HTML_UTF_8,
        ExportFormat::Json => mime::APPLICATION_JSON,
        ExportFormat::Svg => mime::IMAGE_SVG,
    }
}

fn svg_base_name(req: &SingleScreenExportRequest) -> String {
    let name = req
        .screen
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or("screen");
    name.replace(' ', "_")
}

/// Guarda el contenido y lo sirve como adjunto.
async fn download(
    export_service: &ExportService,
    http_req: &HttpRequest,
    content: String,
    base_name: &str,
    format: ExportFormat,
) -> HttpResponse {
    let path = match export_service
        .save_export(&content, base_name, format)
        .await
    {
        Ok(path) => path,
        Err(e) => return error_response(&e, "Failed to save export"),
    };

    match NamedFile::open_async(&path).await {
        Ok(file) => file
            .set_content_type(mime_for(format))
            .set_content_disposition(disposition(
                DispositionType::Attachment,
                format!("{}_export.{}", base_name, format.extension()),
            ))
            .into_response(http_req),
        Err(e) => {
            log::error!("No se pudo abrir el export {:?}: {:?}", path, e);
            error_response(&anyhow::Error::from(e), "Failed to read export")
        }
    }
}

fn inline(content: String, base_name: &str, format: ExportFormat) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(mime_for(format))
        .insert_header(disposition(
            DispositionType::Inline,
            format!("{}_export.{}", base_name, format.extension()),
        ))
        .body(content)
}

/// POST /api/export/html
pub async fn export_html_endpoint(
    export_service: web::Data<ExportService>,
    http_req: HttpRequest,
    body: web::Json<ExportRequest>,
) -> HttpResponse {
    let content = export_service.export_html(&body.screens, &body.project_name);
    let base = sanitize_filename(&body.project_name);
    download(&export_service, &http_req, content, &base, ExportFormat::Html).await
}

/// POST /api/export/json
pub async fn export_json_endpoint(
    export_service: web::Data<ExportService>,
    http_req: HttpRequest,
    body: web::Json<ExportRequest>,
) -> HttpResponse {
    let content = match export_service.export_json(
        &body.screens,
        body.ux_specs.as_ref(),
        body.requirements.as_ref(),
    ) {
        Ok(content) => content,
        Err(e) => return error_response(&e, "Failed to export JSON"),
    };
    let base = sanitize_filename(&body.project_name);
    download(&export_service, &http_req, content, &base, ExportFormat::Json).await
}

/// POST /api/export/svg
pub async fn export_svg_endpoint(
    export_service: web::Data<ExportService>,
    http_req: HttpRequest,
    body: web::Json<SingleScreenExportRequest>,
) -> HttpResponse {
    let content = export_service.export_svg(&body.screen);
    let base = sanitize_filename(&svg_base_name(&body));
    download(&export_service, &http_req, content, &base, ExportFormat::Svg).await
}

/// POST /api/export/html/inline
pub async fn export_html_inline_endpoint(
    export_service: web::Data<ExportService>,
    body: web::Json<ExportRequest>,
) -> HttpResponse {
    let content = export_service.export_html(&body.screens, &body.project_name);
    inline(content, &sanitize_filename(&body.project_name), ExportFormat::Html)
}

/// POST /api/export/json/inline
pub async fn export_json_inline_endpoint(
    export_service: web::Data<ExportService>,
    body: web::Json<ExportRequest>,
) -> HttpResponse {
    match export_service.export_json(
        &body.screens,
        body.ux_specs.as_ref(),
        body.requirements.as_ref(),
    ) {
        Ok(content) => inline(content, &sanitize_filename(&body.project_name), ExportFormat::Json),
        Err(e) => error_response(&e, "Failed to export JSON"),
    }
}

/// POST /api/export/svg/inline
pub async fn export_svg_inline_endpoint(
    export_service: web::Data<ExportService>,
    body: web::Json<SingleScreenExportRequest>,
) -> HttpResponse {
    let content = export_service.export_svg(&body.screen);
    inline(content, &sanitize_filename(&svg_base_name(&body)), ExportFormat::Svg)
}
