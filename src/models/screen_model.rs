//! models/screen_model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Pantalla a generar, tal como la manda el frontend o la produce el
/// generador UX.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "element_labels")]
    pub elements: Vec<String>,
}

impl ScreenSpec {
    #[cfg(test)]
    pub fn new(name: &str, description: &str, elements: &[&str]) -> Self {
        ScreenSpec {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            elements: elements.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// `id` explícito o el nombre en minúsculas con `_` en lugar de espacios.
    pub fn slug(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self.name.to_lowercase().replace(' ', "_"),
        }
    }
}

// Los elementos pueden venir como texto o como objetos editables.
fn element_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Object(map) => ["content", "name", "type"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str))
                .map(str::to_string),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Html,
    Image,
    #[default]
    Hybrid,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Html => "html",
            GenerationMode::Image => "image",
            GenerationMode::Hybrid => "hybrid",
        }
    }

    pub fn wants_html(&self) -> bool {
        matches!(self, GenerationMode::Html | GenerationMode::Hybrid)
    }

    pub fn wants_images(&self) -> bool {
        matches!(self, GenerationMode::Image | GenerationMode::Hybrid)
    }
}

fn default_ui_standards() -> String {
    "modern, clean, accessible".to_string()
}

fn default_image_style() -> String {
    "clean wireframe".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenGenerationRequest {
    pub screens: Vec<ScreenSpec>,
    #[serde(default = "default_ui_standards")]
    pub ui_standards: String,
    #[serde(default)]
    pub generation_mode: GenerationMode,
    #[serde(default = "default_image_style")]
    pub image_style: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditableElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: String,
    pub content: String,
    pub position: Position,
    pub styles: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedScreen {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_layout: Option<String>,
    pub elements: Vec<EditableElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mockup_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_method: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockupImage {
    pub screen_id: String,
    pub screen_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    pub generation_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_used: Option<String>,
    pub generated_at: String,
    pub elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenGenerationResponse {
    pub screens: Vec<GeneratedScreen>,
    pub total_screens: usize,
    pub generated_at: String,
    pub generation_method: String,
    pub mockup_images: Vec<MockupImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageVariationsRequest {
    pub screen_data: ScreenSpec,
    #[serde(default)]
    pub styles: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ImageVariationsQuery {
    pub screen_id: String,
}
