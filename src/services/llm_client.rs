//! services/llm_client.rs
//! Cliente HTTP para los proveedores de texto (Anthropic y OpenAI).

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::config::app_config::{ProviderPreference, Settings};
use crate::error::TuxError;
use crate::models::cost_model::ServiceType;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const OPENAI_BASE_URL: &str = "https://api.openai.com";
/// Caracteres del body de error que se incluyen en el mensaje
const ERROR_EXCERPT_LEN: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    OpenAi,
}

impl LlmProvider {
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "Anthropic",
            LlmProvider::OpenAi => "OpenAI",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "claude-3-5-sonnet-20241022",
            LlmProvider::OpenAi => "gpt-3.5-turbo",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => ANTHROPIC_BASE_URL,
            LlmProvider::OpenAi => OPENAI_BASE_URL,
        }
    }

    fn endpoint_path(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "/v1/messages",
            LlmProvider::OpenAi => "/v1/chat/completions",
        }
    }

    pub fn service_type(&self) -> ServiceType {
        match self {
            LlmProvider::Anthropic => ServiceType::Anthropic,
            LlmProvider::OpenAi => ServiceType::Openai,
        }
    }

    /// Proveedor activo según `LLM_PROVIDER` y las llaves disponibles.
    pub fn select(settings: &Settings) -> Option<(LlmProvider, String)> {
        let keys = &settings.api_keys;
        match settings.llm_provider {
            ProviderPreference::Fallback => None,
            ProviderPreference::Anthropic => keys
                .anthropic
                .clone()
                .map(|k| (LlmProvider::Anthropic, k)),
            ProviderPreference::OpenAi => keys.openai.clone().map(|k| (LlmProvider::OpenAi, k)),
            ProviderPreference::Auto => keys
                .anthropic
                .clone()
                .map(|k| (LlmProvider::Anthropic, k))
                .or_else(|| keys.openai.clone().map(|k| (LlmProvider::OpenAi, k))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub tokens_used: u64,
}

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    provider: LlmProvider,
    api_key: String,
    model: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(
        provider: LlmProvider,
        api_key: String,
        model: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("No se pudo crear el cliente HTTP del proveedor LLM")?;
        Ok(LlmClient {
            http,
            provider,
            api_key,
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            base_url: provider.default_base_url().to_string(),
        })
    }

    /// Cambia el host del proveedor (proxies o gateways compatibles).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.provider.endpoint_path())
    }

    /// `None` cuando no hay proveedor configurado (modo fallback).
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>> {
        let Some((provider, key)) = LlmProvider::select(settings) else {
            return Ok(None);
        };
        let client = Self::new(
            provider,
            key,
            settings.default_llm_model.clone(),
            settings.request_timeout,
        )?;
        let base_url = match provider {
            LlmProvider::Anthropic => settings.base_urls.anthropic.as_deref(),
            LlmProvider::OpenAi => settings.base_urls.openai.as_deref(),
        };
        Ok(Some(match base_url {
            Some(url) => client.with_base_url(url),
            None => client,
        }))
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Completion> {
        match self.provider {
            LlmProvider::Anthropic => self.complete_anthropic(prompt, max_tokens, temperature).await,
            LlmProvider::OpenAi => self.complete_openai(prompt, max_tokens, temperature).await,
        }
    }

    async fn complete_anthropic(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Completion> {
        let body = json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "temperature": temperature,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .context("Fallo la petición a Anthropic")?;

        let parsed: AnthropicResponse = read_json(resp, self.provider).await?;
        let text = parsed
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        let tokens_used = parsed
            .usage
            .map(|u| u.input_tokens + u.output_tokens)
            .unwrap_or(0);

        Ok(Completion { text, tokens_used })
    }

    async fn complete_openai(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<Completion> {
        let body = json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "temperature": temperature,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Fallo la petición a OpenAI")?;

        let parsed: OpenAiResponse = read_json(resp, self.provider).await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TuxError::Provider("OpenAI devolvió una respuesta vacía".to_string()))?;

        Ok(Completion {
            text,
            tokens_used: parsed.usage.map(|u| u.total_tokens).unwrap_or(0),
        })
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    provider: LlmProvider,
) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(ERROR_EXCERPT_LEN).collect();
        return Err(TuxError::Provider(format!(
            "{} respondió {}: {}",
            provider.name(),
            status,
            excerpt
        ))
        .into());
    }
    resp.json::<T>()
        .await
        .with_context(|| format!("Respuesta inválida de {}", provider.name()))
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
    usage: Option<AnthropicUsage>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    total_tokens: u64,
}
