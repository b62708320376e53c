//! services/llm_service.rs
//! Capa de negocio sobre el proveedor de texto: limita la concurrencia,
//! cachea respuestas, registra costos y nunca falla hacia el caller
//! (si el proveedor no responde bien se usa contenido de respaldo).

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tokio::{
    sync::{Semaphore, SemaphorePermit},
    time::timeout,
};

use crate::error::TuxError;
use crate::models::design_model::RoleInsight;
use crate::models::question_model::Question;
use crate::models::requirements_model::RequirementsInput;
use crate::services::cost_tracker::{CostTracker, UsageRecord};
use crate::services::fallback_content;
use crate::services::llm_client::LlmClient;
use crate::services::request_cache::RequestCache;

/// Espera máxima por un permiso del semáforo
const PERMIT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct LlmService {
    client: Option<LlmClient>,
    semaphore: Arc<Semaphore>,
    cache: RequestCache,
    cost_tracker: CostTracker,
    permit_timeout: Duration,
}

impl LlmService {
    pub fn new(
        client: Option<LlmClient>,
        max_concurrent: usize,
        cache: RequestCache,
        cost_tracker: CostTracker,
    ) -> Self {
        match &client {
            Some(c) => log::info!(
                "LLM Service inicializado con {} ({})",
                c.provider().name(),
                c.model()
            ),
            None => log::info!("LLM Service en modo fallback: no hay proveedor configurado"),
        }
        LlmService {
            client,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            cache,
            cost_tracker,
            permit_timeout: PERMIT_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_permit_timeout(mut self, permit_timeout: Duration) -> Self {
        self.permit_timeout = permit_timeout;
        self
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.client.as_ref().map(|c| c.provider().name())
    }

    pub fn active_model(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.model())
    }

    async fn acquire_permit(&self) -> Result<SemaphorePermit<'_>> {
        timeout(self.permit_timeout, self.semaphore.acquire())
            .await
            .map_err(|_| TuxError::Busy("Timeout esperando permiso en LlmService".to_string()))?
            .context("No se pudo adquirir el semaphore")
    }

    /// Llamada al proveedor con cache y registro de costos.
    pub(crate) async fn call_provider(
        &self,
        operation: &str,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| TuxError::Provider("No hay proveedor LLM configurado".to_string()))?;

        let key = RequestCache::key(operation, client.model(), prompt);
        if let Some(hit) = self.cache.get(&key).await {
            log::debug!("Cache hit para {}", operation);
            return Ok(hit);
        }

        let _guard = self.acquire_permit().await?;
        let start = Instant::now();
        let result = client.complete(prompt, max_tokens, temperature).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let (tokens_used, success) = match &result {
            Ok(c) => (c.tokens_used, true),
            Err(_) => (0, false),
        };
        self.cost_tracker
            .track_usage(UsageRecord {
                service: client.provider().service_type(),
                model: client.model(),
                operation,
                tokens_used,
                response_time_ms: elapsed_ms,
                user_session: None,
                success,
            })
            .await;

        let completion = result?;
        self.cache.insert(key, completion.text.clone()).await;
        Ok(completion.text)
    }

    /// Texto libre; sin proveedor devuelve HTML o una guía corta.
    pub async fn generate_text(&self, prompt: &str, max_tokens: u32, temperature: f32) -> String {
        if self.is_available() {
            match self
                .call_provider("text_generation", prompt, max_tokens, temperature)
                .await
            {
                Ok(text) => return text,
                Err(e) => log::error!("Generación de texto falló: {:?}", e),
            }
        }

        let lower = prompt.to_lowercase();
        if lower.contains("html") || lower.contains("layout") {
            fallback_content::html_layout(prompt)
        } else {
            fallback_content::helpful_response(prompt)
        }
    }

    pub async fn generate_dynamic_questions(&self, app_idea: &str) -> Vec<Question> {
        if !self.is_available() {
            return fallback_content::smart_questions(app_idea);
        }

        let prompt = questions_prompt(app_idea);
        let raw = match self
            .call_provider("question_generation", &prompt, 4000, 0.7)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Generación de preguntas falló: {:?}", e);
                return fallback_content::professional_questions();
            }
        };

        match parse_questions(&raw) {
            Ok(questions) if questions.is_empty() => fallback_content::smart_questions(app_idea),
            Ok(questions) => questions,
            Err(e) => {
                log::error!("No se pudo parsear el JSON de preguntas: {:?}", e);
                fallback_content::professional_questions()
            }
        }
    }

    pub async fn generate_multi_role_analysis(&self, req: &RequirementsInput) -> RoleInsight {
        let audience = req.audience.joined();
        if self.is_available() {
            let prompt = role_analysis_prompt(req);
            match self
                .call_provider("multi_role_analysis", &prompt, 1500, 0.5)
                .await
            {
                Ok(raw) => match parse_role_insight(&raw) {
                    Some(insight) => return insight,
                    None => log::warn!("El análisis por roles no trae designer/analyst/architect"),
                },
                Err(e) => log::error!("Análisis por roles falló: {:?}", e),
            }
        }
        fallback_content::role_insights(&req.purpose, &audience)
    }

    /// Especificación UX como JSON; siempre trae al menos una pantalla.
    pub async fn generate_ux_specifications(
        &self,
        req: &RequirementsInput,
        insights: Option<&RoleInsight>,
    ) -> Value {
        let audience = req.audience.joined();
        if self.is_available() {
            let prompt = ux_spec_prompt(req, insights);
            match self.call_provider("ux_generation", &prompt, 4000, 0.7).await {
                Ok(raw) => {
                    if let Some(mut spec) = parse_spec_object(&raw) {
                        fallback_content::complete_spec_defaults(&mut spec);
                        return Value::Object(spec);
                    }
                    log::warn!("La especificación UX del proveedor no trae pantallas");
                }
                Err(e) => log::error!("Generación de especificación UX falló: {:?}", e),
            }
        }
        fallback_content::template_ux_spec(&req.purpose, &audience, insights)
    }

    /// HTML de una pantalla; si el del proveedor no es válido usa una plantilla.
    pub async fn generate_html_layout(&self, screen_prompt: &str) -> String {
        if self.is_available() {
            match self
                .call_provider("html_generation", screen_prompt, 4000, 0.3)
                .await
            {
                Ok(html) if fallback_content::is_valid_html(&html) => return html,
                Ok(_) => log::warn!("HTML del proveedor inválido, se usa plantilla"),
                Err(e) => log::error!("Generación de HTML falló: {:?}", e),
            }
        }
        fallback_content::html_layout(screen_prompt)
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------

fn questions_prompt(app_idea: &str) -> String {
    format!(
        r#"You are a senior UX designer running a requirements gathering session for a new app.
The client wants to build: "{app_idea}"

Generate 12-15 questions a professional UX designer would ask, each with 3-5 smart,
context-aware answer options that the user can simply select.

Cover: target audience, core features, business goals, user experience, technical
requirements, content and data management.

Return a JSON array where each item looks like:
{{
  "id": 1,
  "question": "Clear, specific question text",
  "type": "single_select|multi_select|priority_rank",
  "category": "target_audience|features|business|ux_design|technical|content",
  "options": [{{"value": "option_key", "label": "Option text", "description": "Short explanation"}}],
  "allow_custom": true,
  "why_asking": "Why this matters for UX design"
}}"#
    )
}

fn role_analysis_prompt(req: &RequirementsInput) -> String {
    format!(
        r#"Analyze this app from three expert perspectives.

Purpose: {}
Target Audience: {}
Goals: {}
Use Cases: {}

Return a JSON object with exactly these keys, each a short paragraph:
{{"designer": "...", "analyst": "...", "architect": "..."}}"#,
        req.purpose,
        req.audience.joined(),
        req.goals.joined(),
        req.use_cases.join(", ")
    )
}

fn ux_spec_prompt(req: &RequirementsInput, insights: Option<&RoleInsight>) -> String {
    let insights_block = match insights {
        Some(i) => format!(
            "\nRole Insights:\n- Designer: {}\n- Analyst: {}\n- Architect: {}\n",
            i.designer, i.analyst, i.architect
        ),
        None => String::new(),
    };
    format!(
        r#"Based on the following requirements, generate comprehensive UX specifications.

Requirements:
- Purpose: {}
- Target Audience: {}
- User Goals: {}
- Use Cases: {}
{}
Return JSON with this structure:
{{
  "screens": [{{"id": "screen_id", "name": "Screen Name", "description": "...", "elements": ["element1"], "userFlow": "...", "interactions": ["click"], "accessibility": ["keyboard navigation"]}}],
  "iaStructure": {{"navigation": "...", "hierarchy": "...", "relationships": "..."}},
  "standards": {{"accessibility": "WCAG 2.1 AA", "responsive": "Mobile-first", "patterns": "..."}}
}}"#,
        req.purpose,
        req.audience.joined(),
        req.goals.joined(),
        req.use_cases.join(", "),
        insights_block
    )
}

// ---------------------------------------------------------------------------
// Parsing de respuestas
// ---------------------------------------------------------------------------

/// Contenido de un bloque ```json``` (o ``` genérico); si no hay, el texto completo.
pub fn extract_json_block(text: &str) -> &str {
    for fence in ["```json", "```"] {
        if let Some(start) = text.find(fence) {
            let rest = &text[start + fence.len()..];
            let end = rest.find("```").unwrap_or(rest.len());
            return rest[..end].trim();
        }
    }
    text.trim()
}

/// Arreglo JSON dentro del texto: bloque ```json``` o del primer `[` al último `]`.
pub fn extract_json_array(text: &str) -> &str {
    if text.contains("```json") {
        return extract_json_block(text);
    }
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text.trim(),
    }
}

fn extract_json_object(text: &str) -> &str {
    let block = extract_json_block(text);
    match (block.find('{'), block.rfind('}')) {
        (Some(start), Some(end)) if end > start => &block[start..=end],
        _ => block,
    }
}

/// Preguntas del proveedor; las que no se pueden reparar se descartan.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>> {
    let items: Vec<Value> = serde_json::from_str(extract_json_array(raw))
        .context("La respuesta no contiene un arreglo JSON válido")?;
    let questions = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            match serde_json::from_value::<Question>(normalize_question(i, item)) {
                Ok(q) => Some(q),
                Err(e) => {
                    log::warn!("Pregunta {} descartada: {}", i + 1, e);
                    None
                }
            }
        })
        .collect();
    Ok(questions)
}

/// Completa campos faltantes y lleva cada opción a `{value, label}`.
pub fn normalize_question(index: usize, item: Value) -> Value {
    let mut q = match item {
        Value::Object(map) => map,
        other => return other,
    };
    q.entry("id").or_insert_with(|| Value::from(index as u64 + 1));
    q.entry("type")
        .or_insert_with(|| Value::from("single_select"));
    q.entry("category").or_insert_with(|| Value::from("general"));
    q.entry("allow_custom").or_insert(Value::Bool(true));

    if let Some(Value::Array(options)) = q.remove("options") {
        let repaired: Vec<Value> = options
            .into_iter()
            .enumerate()
            .filter_map(|(j, opt)| normalize_option(j, opt))
            .collect();
        q.insert("options".to_string(), Value::Array(repaired));
    }
    Value::Object(q)
}

fn normalize_option(index: usize, opt: Value) -> Option<Value> {
    let mut obj = match opt {
        Value::Null => return None,
        Value::Object(obj) => obj,
        scalar => {
            let mut obj = Map::new();
            obj.insert("label".to_string(), Value::from(value_text(&scalar)));
            obj
        }
    };

    let value = match obj.get("value") {
        None | Some(Value::Null) => format!("option_{}", index),
        Some(v) => value_text(v),
    };
    let label = match obj.get("label") {
        None | Some(Value::Null) => value.clone(),
        Some(l) => value_text(l),
    };
    obj.insert("value".to_string(), Value::from(value));
    obj.insert("label".to_string(), Value::from(label));
    match obj.remove("description") {
        None | Some(Value::Null) => {}
        Some(d) => {
            obj.insert("description".to_string(), Value::from(value_text(&d)));
        }
    }
    Some(Value::Object(obj))
}

fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_role_insight(raw: &str) -> Option<RoleInsight> {
    serde_json::from_str::<RoleInsight>(extract_json_object(raw)).ok()
}

fn parse_spec_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(extract_json_object(raw)).ok()? {
        Value::Object(spec) => {
            let has_screens = spec
                .get("screens")
                .and_then(Value::as_array)
                .map(|s| !s.is_empty())
                .unwrap_or(false);
            has_screens.then_some(spec)
        }
        _ => None,
    }
}
