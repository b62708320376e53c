//! models/question_model.rs
//! Preguntas de descubrimiento UX que se muestran al usuario.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionOption {
    Detailed {
        value: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Plain(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_if_unsure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_custom: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_asking: Option<String>,
}

impl Question {
    /// Pregunta mínima; el resto de campos se completa con los builders.
    pub fn new(id: QuestionId, question: &str, question_type: &str) -> Self {
        Question {
            id,
            question: question.to_string(),
            question_type: question_type.to_string(),
            category: None,
            options: Vec::new(),
            required: None,
            help_text: None,
            placeholder: None,
            default_if_unsure: None,
            allow_custom: None,
            why_asking: None,
        }
    }

    pub fn with_plain_options(mut self, options: &[&str]) -> Self {
        self.options = options
            .iter()
            .map(|o| QuestionOption::Plain(o.to_string()))
            .collect();
        self
    }

    pub fn with_detailed_options(mut self, options: &[(&str, &str, &str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label, description)| QuestionOption::Detailed {
                value: value.to_string(),
                label: label.to_string(),
                description: Some(description.to_string()),
            })
            .collect();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn help(mut self, text: &str) -> Self {
        self.help_text = Some(text.to_string());
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    pub fn default_if_unsure(mut self, text: &str) -> Self {
        self.default_if_unsure = Some(text.to_string());
        self
    }

    pub fn allow_custom(mut self, allow: bool) -> Self {
        self.allow_custom = Some(allow);
        self
    }

    pub fn why_asking(mut self, text: &str) -> Self {
        self.why_asking = Some(text.to_string());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuestionsRequest {
    pub app_idea: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionsMetadata {
    pub total_questions: usize,
    pub categories: Vec<String>,
    pub question_types: Vec<String>,
    pub app_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsResponse {
    pub status: String,
    pub app_idea: String,
    pub questions: Vec<Question>,
    pub metadata: QuestionsMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestQuestionsResponse {
    pub app_idea: String,
    pub question_count: usize,
    pub categories: Vec<String>,
    pub sample_questions: Vec<Question>,
}
