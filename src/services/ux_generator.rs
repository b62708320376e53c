//! services/ux_generator.rs
//! Orquesta la generación de la especificación UX completa.

use anyhow::{anyhow, Result};
use serde_json::{json, Map, Value};

use crate::models::catalog_model::AiModel;
use crate::models::design_model::UxSpecification;
use crate::models::requirements_model::RequirementsInput;
use crate::services::llm_service::{extract_json_block, LlmService};

const SECTION_MAX_TOKENS: u32 = 1024;
const SECTION_TEMPERATURE: f32 = 0.3;

#[derive(Clone)]
pub struct UxGenerator {
    llm: LlmService,
}

impl UxGenerator {
    pub fn new(llm: LlmService) -> Self {
        UxGenerator { llm }
    }

    pub async fn generate_specifications(
        &self,
        req: &RequirementsInput,
        preferred_model: Option<AiModel>,
    ) -> Result<UxSpecification> {
        if let Some(model) = preferred_model {
            log::info!("Modelo preferido para la especificación: {}", model.id());
        }

        // 1) análisis por roles
        let role_insights = if req.simulate_roles {
            Some(self.llm.generate_multi_role_analysis(req).await)
        } else {
            None
        };

        // 2) especificación base
        let mut spec = match self
            .llm
            .generate_ux_specifications(req, role_insights.as_ref())
            .await
        {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let screens = match spec.remove("screens") {
            Some(Value::Array(screens)) if !screens.is_empty() => screens,
            _ => return Err(anyhow!("UX specification has no screens")),
        };
        let screen_names: Vec<String> = screens
            .iter()
            .filter_map(|s| s.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        // 3) secciones que no vinieron en la especificación base
        let component_library = self
            .section(
                &mut spec,
                "componentLibrary",
                &component_prompt(req),
                json!({
                    "primaryLibrary": { "name": "Material-UI", "reason": "Comprehensive and accessible" },
                    "componentMapping": {},
                    "customComponents": []
                }),
            )
            .await;
        let data_model = self
            .section(
                &mut spec,
                "dataModel",
                &data_model_prompt(req, &screen_names),
                json!({ "entities": [], "apiEndpoints": [], "validationRules": {} }),
            )
            .await;
        let interaction_patterns = self
            .section(
                &mut spec,
                "interactionPatterns",
                &interaction_prompt(&screen_names),
                json!({ "globalPatterns": {}, "transitions": {}, "microInteractions": [] }),
            )
            .await;
        let responsive_design = self
            .section(
                &mut spec,
                "responsiveDesign",
                RESPONSIVE_PROMPT,
                json!({
                    "breakpoints": { "mobile": "0-767px", "tablet": "768px-1023px", "desktop": "1024px+" },
                    "layoutRules": {},
                    "typography": {}
                }),
            )
            .await;
        let seo_performance = self
            .section(
                &mut spec,
                "seoPerformance",
                &seo_prompt(req),
                json!({ "seo": {}, "performance": {}, "imageOptimization": {} }),
            )
            .await;

        Ok(UxSpecification {
            screens,
            role_insights,
            component_library,
            data_model,
            interaction_patterns,
            responsive_design,
            seo_performance,
            ia_structure: spec.remove("iaStructure").filter(|v| !v.is_null()),
            standards: spec.remove("standards").filter(|v| !v.is_null()),
        })
    }

    /// Usa la sección existente o la pide al LLM; si no parsea, `default`.
    async fn section(
        &self,
        spec: &mut Map<String, Value>,
        key: &str,
        prompt: &str,
        default: Value,
    ) -> Value {
        match spec.remove(key) {
            Some(existing) if !existing.is_null() => existing,
            _ => {
                let response = self
                    .llm
                    .generate_text(prompt, SECTION_MAX_TOKENS, SECTION_TEMPERATURE)
                    .await;
                parse_section(&response, default, key)
            }
        }
    }
}

fn parse_section(response: &str, default: Value, key: &str) -> Value {
    match serde_json::from_str::<Value>(extract_json_block(response)) {
        Ok(value @ Value::Object(_)) => value,
        _ => {
            log::warn!("No se pudo parsear la sección {}, se usa el default", key);
            default
        }
    }
}

fn component_prompt(req: &RequirementsInput) -> String {
    format!(
        r#"Recommend UI component libraries for this app.

App Type: {}
Target Platform: Web application
Design Style: Modern, accessible, responsive

Return JSON:
{{"primaryLibrary": {{"name": "...", "reason": "...", "pros": [], "cons": []}}, "alternativeLibraries": [], "componentMapping": {{}}, "customComponents": [], "thirdPartyIntegrations": []}}"#,
        req.purpose
    )
}

fn data_model_prompt(req: &RequirementsInput, screens: &[String]) -> String {
    format!(
        r#"Design a data model for an application.

Purpose: {}
Screens: {}

Return JSON:
{{"entities": [{{"name": "User", "attributes": [{{"name": "id", "type": "UUID", "required": true}}], "relationships": []}}], "apiEndpoints": [{{"method": "GET", "path": "/api/users", "description": "..."}}], "validationRules": {{}}}}"#,
        req.purpose,
        screens.join(", ")
    )
}

fn interaction_prompt(screens: &[String]) -> String {
    format!(
        r#"Define interaction patterns (hover, click, transitions, loading, error and success states) for these screens: {}

Return JSON:
{{"globalPatterns": {{}}, "transitions": {{}}, "microInteractions": []}}"#,
        screens.join(", ")
    )
}

const RESPONSIVE_PROMPT: &str = r#"Design a mobile-first responsive system with breakpoints, layout rules, typography scaling and touch target sizes.

Return JSON:
{"breakpoints": {"mobile": "0-767px", "tablet": "768px-1023px", "desktop": "1024px-1439px", "wide": "1440px+"}, "layoutRules": {}, "typography": {}, "touchTargets": {}}"#;

fn seo_prompt(req: &RequirementsInput) -> String {
    format!(
        r#"Create SEO and performance guidelines for: {}

Return JSON:
{{"seo": {{}}, "performance": {{"targets": {{}}, "optimization": []}}, "imageOptimization": {{}}}}"#,
        req.purpose
    )
}
