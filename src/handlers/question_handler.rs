//! handlers/question_handler.rs
use actix_web::{web, HttpResponse};

use crate::error::error_response;
use crate::models::question_model::GenerateQuestionsRequest;
use crate::services::question_service::QuestionService;

/// POST /api/generate-questions
pub async fn generate_questions_endpoint(
    question_service: web::Data<QuestionService>,
    body: web::Json<GenerateQuestionsRequest>,
) -> HttpResponse {
    let app_idea = body.into_inner().app_idea.unwrap_or_default();
    match question_service.generate_questions(&app_idea).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(&e, "Failed to generate questions"),
    }
}

/// GET /api/test-questions/{app_type}
pub async fn test_questions_endpoint(
    question_service: web::Data<QuestionService>,
    path: web::Path<String>,
) -> HttpResponse {
    let app_type = path.into_inner();
    HttpResponse::Ok().json(question_service.test_questions(&app_type).await)
}
