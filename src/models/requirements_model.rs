//! models/requirements_model.rs

use serde::{Deserialize, Serialize};

/// Campo que el frontend manda como texto o como lista.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    Single(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// Valores no vacíos, ya recortados.
    pub fn items(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            StringOrList::Single(s) => s.split(',').collect(),
            StringOrList::Many(v) => v.iter().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.items().is_empty()
    }

    pub fn joined(&self) -> String {
        self.items().join(", ")
    }
}

impl Default for StringOrList {
    fn default() -> Self {
        StringOrList::Many(Vec::new())
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementsInput {
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub audience: StringOrList,
    #[serde(default)]
    pub demographics: Option<String>,
    #[serde(default)]
    pub goals: StringOrList,
    #[serde(default, alias = "useCases")]
    pub use_cases: Vec<String>,
    #[serde(default, alias = "technicalRequirements")]
    pub technical_requirements: Option<Vec<String>>,
    #[serde(default)]
    pub accessibility: Option<Vec<String>>,
    #[serde(default = "default_true", alias = "simulateRoles")]
    pub simulate_roles: bool,
}

impl RequirementsInput {
    #[allow(dead_code)]
    #[cfg(test)]
    pub fn test_new(purpose: &str, audience: &[&str], goals: &[&str], use_cases: &[&str]) -> Self {
        let list = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            purpose: purpose.to_string(),
            audience: StringOrList::Many(list(audience)),
            demographics: None,
            goals: StringOrList::Many(list(goals)),
            use_cases: list(use_cases),
            technical_requirements: None,
            accessibility: None,
            simulate_roles: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub missing_fields: Vec<String>,
    pub warnings: Vec<String>,
    pub completeness_score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRequirements {
    pub purpose: String,
    pub audience: Vec<String>,
    pub demographics: Option<String>,
    pub goals: Vec<String>,
    pub use_cases: Vec<String>,
    pub technical_requirements: Vec<String>,
    pub accessibility: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequirementsAnalysis {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessedRequirements {
    pub requirements: NormalizedRequirements,
    pub app_type: String,
    pub audience_segments: usize,
    pub complexity: String,
    pub enriched: bool,
    pub analysis: RequirementsAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessRequirementsResponse {
    pub status: String,
    pub data: ProcessedRequirements,
    pub suggestions: Vec<String>,
}
