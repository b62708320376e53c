//! services/question_service.rs

use std::collections::BTreeSet;

use anyhow::Result;

use crate::error::TuxError;
use crate::models::question_model::{
    GenerateQuestionsResponse, Question, QuestionsMetadata, TestQuestionsResponse,
};
use crate::services::llm_service::LlmService;

const MAX_APP_IDEA_LEN: usize = 1000;

#[derive(Clone)]
pub struct QuestionService {
    llm: LlmService,
}

impl QuestionService {
    pub fn new(llm: LlmService) -> Self {
        QuestionService { llm }
    }

    pub async fn generate_questions(&self, app_idea: &str) -> Result<GenerateQuestionsResponse> {
        let idea = app_idea.trim();
        let len = idea.chars().count();
        if len == 0 {
            return Err(TuxError::Validation("App idea cannot be empty".to_string()).into());
        }
        if len > MAX_APP_IDEA_LEN {
            return Err(TuxError::Validation(format!(
                "App idea must be at most {} characters",
                MAX_APP_IDEA_LEN
            ))
            .into());
        }

        log::info!("Generando preguntas para: {}", idea);
        let questions = self.llm.generate_dynamic_questions(idea).await;
        if questions.len() < 10 {
            log::warn!("Solo se generaron {} preguntas", questions.len());
        }

        let metadata = QuestionsMetadata {
            total_questions: questions.len(),
            categories: categories(&questions),
            question_types: question_types(&questions),
            app_type: detect_app_type(idea).to_string(),
        };

        Ok(GenerateQuestionsResponse {
            status: "success".to_string(),
            app_idea: idea.to_string(),
            questions,
            metadata,
        })
    }

    /// Ideas de ejemplo para probar la generación sin frontend.
    pub async fn test_questions(&self, app_type: &str) -> TestQuestionsResponse {
        let idea = sample_idea(app_type);
        let questions = self.llm.generate_dynamic_questions(idea).await;
        TestQuestionsResponse {
            app_idea: idea.to_string(),
            question_count: questions.len(),
            categories: categories(&questions),
            sample_questions: questions.into_iter().take(3).collect(),
        }
    }
}

fn categories(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .map(|q| q.category.clone().unwrap_or_else(|| "general".to_string()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn question_types(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .map(|q| {
            if q.question_type.is_empty() {
                "text".to_string()
            } else {
                q.question_type.clone()
            }
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Primera categoría cuyo término aparece en la idea.
pub fn detect_app_type(app_idea: &str) -> &'static str {
    const RULES: [(&str, &[&str]); 6] = [
        ("e-commerce", &["shop", "store", "commerce", "market"]),
        ("social", &["social", "community", "network"]),
        ("education", &["learn", "education", "course"]),
        ("health", &["health", "fitness", "medical"]),
        ("gaming", &["game", "play", "gaming"]),
        ("productivity", &["productivity", "task", "manage"]),
    ];
    let idea = app_idea.to_lowercase();
    RULES
        .iter()
        .find(|(_, terms)| terms.iter().any(|t| idea.contains(t)))
        .map(|(kind, _)| *kind)
        .unwrap_or("general")
}

fn sample_idea(app_type: &str) -> &'static str {
    match app_type {
        "library" => "A community library app for sharing books",
        "fitness" => "A personal fitness tracking app with workout plans",
        "marketplace" => "An online marketplace for handmade crafts",
        "education" => "An online learning platform for coding",
        "social" => "A social network for pet owners",
        _ => "A mobile app",
    }
}
