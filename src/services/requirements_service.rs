//! services/requirements_service.rs
//! Validación y normalización de los requerimientos del usuario.

use anyhow::Result;

use crate::error::TuxError;
use crate::models::requirements_model::{
    NormalizedRequirements, ProcessedRequirements, RequirementsAnalysis, RequirementsInput,
    ValidationReport,
};
use crate::services::question_service::detect_app_type;

const MIN_PURPOSE_LEN: usize = 10;

#[derive(Clone, Default)]
pub struct RequirementsService;

impl RequirementsService {
    pub fn new() -> Self {
        RequirementsService
    }

    pub fn validate(&self, req: &RequirementsInput) -> ValidationReport {
        let mut missing_fields = Vec::new();
        if req.purpose.trim().is_empty() {
            missing_fields.push("purpose".to_string());
        }
        if req.audience.is_blank() {
            missing_fields.push("audience".to_string());
        }
        if req.goals.is_blank() {
            missing_fields.push("goals".to_string());
        }

        let mut warnings = Vec::new();
        if non_blank(&req.use_cases).is_empty() {
            warnings.push("No use cases provided".to_string());
        }
        let purpose_len = req.purpose.trim().chars().count();
        if purpose_len > 0 && purpose_len < MIN_PURPOSE_LEN {
            warnings.push("Purpose description is very short".to_string());
        }

        let required_present = 3 - missing_fields.len();
        let optional_present = [
            !non_blank(&req.use_cases).is_empty(),
            req.demographics
                .as_deref()
                .map(|d| !d.trim().is_empty())
                .unwrap_or(false),
            req.technical_requirements
                .as_deref()
                .map(|t| !non_blank(t).is_empty())
                .unwrap_or(false),
            req.accessibility
                .as_deref()
                .map(|a| !non_blank(a).is_empty())
                .unwrap_or(false),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        let score = 60 * required_present / 3 + 10 * optional_present;

        ValidationReport {
            is_valid: missing_fields.is_empty(),
            missing_fields,
            warnings,
            completeness_score: score.min(100) as u8,
        }
    }

    pub fn process(&self, req: &RequirementsInput) -> Result<ProcessedRequirements> {
        let report = self.validate(req);
        if !report.is_valid {
            return Err(TuxError::Validation(format!(
                "Missing required fields: {}",
                report.missing_fields.join(", ")
            ))
            .into());
        }

        let requirements = normalize(req);
        let app_type = detect_app_type(&requirements.purpose).to_string();
        let audience_segments = requirements.audience.len();
        let complexity = match requirements.use_cases.len() {
            0..=2 => "simple",
            3..=5 => "moderate",
            _ => "complex",
        };

        let summary = format!(
            "{} application for {} audience segment(s) with {} use case(s); {} complexity",
            app_type,
            audience_segments,
            requirements.use_cases.len(),
            complexity
        );
        log::info!("Requerimientos procesados: {}", summary);

        Ok(ProcessedRequirements {
            requirements,
            app_type,
            audience_segments,
            complexity: complexity.to_string(),
            enriched: true,
            analysis: RequirementsAnalysis { summary },
        })
    }

    /// Sugerencias a partir de lo que falta en los requerimientos.
    pub fn suggestions(&self, req: &RequirementsInput) -> Vec<String> {
        let mut out = Vec::new();
        if non_blank(&req.use_cases).is_empty() {
            out.push("Add specific use cases to describe how users will interact with the app".to_string());
        }
        if req
            .accessibility
            .as_deref()
            .map(|a| non_blank(a).is_empty())
            .unwrap_or(true)
        {
            out.push("Consider accessibility requirements such as WCAG 2.1 AA compliance".to_string());
        }
        if req
            .technical_requirements
            .as_deref()
            .map(|t| non_blank(t).is_empty())
            .unwrap_or(true)
        {
            out.push("Specify technical requirements like platforms, integrations, or performance targets".to_string());
        }
        if req.audience.items().len() == 1 {
            out.push("Consider secondary audience segments that might use the app".to_string());
        }
        if req
            .demographics
            .as_deref()
            .map(|d| d.trim().is_empty())
            .unwrap_or(true)
        {
            out.push("Describe audience demographics to tailor the design".to_string());
        }
        out
    }
}

fn non_blank(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize(req: &RequirementsInput) -> NormalizedRequirements {
    NormalizedRequirements {
        purpose: req.purpose.trim().to_string(),
        audience: req.audience.items(),
        demographics: req
            .demographics
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        goals: req.goals.items(),
        use_cases: non_blank(&req.use_cases),
        technical_requirements: req
            .technical_requirements
            .as_deref()
            .map(non_blank)
            .unwrap_or_default(),
        accessibility: req.accessibility.as_deref().map(non_blank).unwrap_or_default(),
    }
}
