//! services/vision_service.rs
//! Mockups de pantallas con modelos de imagen en Replicate.
//! Sin token se generan mockups HTML.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::TuxError;
use crate::models::catalog_model::VisionModel;
use crate::models::cost_model::ServiceType;
use crate::models::screen_model::{MockupImage, ScreenSpec};
use crate::services::cost_tracker::{CostTracker, UsageRecord};

const REPLICATE_BASE_URL: &str = "https://api.replicate.com";
const SDXL_VERSION: &str = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b";
const PLAYGROUND_V2_VERSION: &str =
    "42fe626e41cc811eaf02c94b892774839268ce1994ea778eba97103fe1ef51b8";
/// Elementos que se incluyen en el prompt
const MAX_PROMPT_ELEMENTS: usize = 10;

const QUALITY_PHRASES: [&str; 5] = [
    "high quality UI design",
    "professional mockup",
    "clean layout",
    "proper spacing and alignment",
    "consistent design system",
];

#[derive(Clone)]
pub struct VisionService {
    http: reqwest::Client,
    token: Option<String>,
    model: VisionModel,
    cost_tracker: CostTracker,
    base_url: String,
}

impl VisionService {
    pub fn new(
        token: Option<String>,
        model: VisionModel,
        timeout: Duration,
        cost_tracker: CostTracker,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("No se pudo crear el cliente HTTP de Replicate")?;
        if token.is_some() {
            log::info!("Replicate inicializado ({})", model.id());
        } else {
            log::warn!("No hay REPLICATE_API_TOKEN: solo mockups HTML");
        }
        Ok(VisionService {
            http,
            token,
            model,
            cost_tracker,
            base_url: REPLICATE_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn is_available(&self) -> bool {
        self.token.is_some()
    }

    /// Un mockup por pantalla, en el mismo orden. Las que fallan usan HTML.
    pub async fn generate_mockup_images(
        &self,
        screens: &[ScreenSpec],
        style: &str,
    ) -> Vec<MockupImage> {
        if !self.is_available() {
            log::info!("Replicate no configurado: mockups HTML");
            return screens.iter().map(html_fallback_mockup).collect();
        }

        let results = join_all(screens.iter().map(|s| self.single_mockup(s, style))).await;
        results
            .into_iter()
            .zip(screens)
            .enumerate()
            .map(|(i, (result, screen))| match result {
                Ok(mockup) => mockup,
                Err(e) => {
                    log::error!("Falló el mockup de la pantalla {}: {:?}", i, e);
                    html_fallback_mockup(screen)
                }
            })
            .collect()
    }

    /// Una variación por estilo; los estilos que fallan se omiten.
    pub async fn generate_style_variations(
        &self,
        screen: &ScreenSpec,
        styles: &[String],
    ) -> Vec<MockupImage> {
        if !self.is_available() {
            return Vec::new();
        }

        let mut variations = Vec::new();
        for style in styles {
            match self.single_mockup(screen, style).await {
                Ok(mut mockup) => {
                    mockup.style = Some(style.clone());
                    variations.push(mockup);
                }
                Err(e) => log::error!("Falló la variación {}: {:?}", style, e),
            }
        }
        variations
    }

    async fn single_mockup(&self, screen: &ScreenSpec, style: &str) -> Result<MockupImage> {
        let prompt = build_mockup_prompt(screen, style);
        let (version, input, method) = match self.model {
            VisionModel::StableDiffusionXl => (
                SDXL_VERSION,
                json!({
                    "prompt": prompt,
                    "negative_prompt": "blurry, low quality, distorted, unrealistic, photograph, 3d render",
                    "width": 1024,
                    "height": 1024,
                    "num_outputs": 1,
                    "scheduler": "K_EULER",
                    "num_inference_steps": 25,
                    "guidance_scale": 7.5,
                    "prompt_strength": 0.8,
                    "refine": "expert_ensemble_refiner",
                    "high_noise_frac": 0.8,
                }),
                "stable_diffusion_xl",
            ),
            VisionModel::PlaygroundV2 => (
                PLAYGROUND_V2_VERSION,
                json!({
                    "prompt": prompt,
                    "negative_prompt": "low quality, blurry, distorted",
                    "width": 1024,
                    "height": 1024,
                    "scheduler": "K_EULER_ANCESTRAL",
                    "guidance_scale": 3,
                    "num_inference_steps": 50,
                }),
                "playground_v2",
            ),
        };

        let start = Instant::now();
        let result = self.run_prediction(version, input).await;
        self.cost_tracker
            .track_usage(UsageRecord {
                service: ServiceType::Replicate,
                model: self.model.id(),
                operation: "mockup_generation",
                tokens_used: 0,
                response_time_ms: start.elapsed().as_millis() as u64,
                user_session: None,
                success: result.is_ok(),
            })
            .await;
        let image_url = result?;

        Ok(MockupImage {
            screen_id: screen.slug(),
            screen_name: screen_name(screen),
            description: screen.description.clone(),
            image_url: Some(image_url),
            image_format: Some("png".to_string()),
            html_content: None,
            generation_method: method.to_string(),
            prompt_used: Some(prompt),
            generated_at: Utc::now().to_rfc3339(),
            elements: screen.elements.clone(),
            style: None,
        })
    }

    async fn run_prediction(&self, version: &str, input: Value) -> Result<String> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| TuxError::Provider("Replicate no configurado".to_string()))?;

        let resp = self
            .http
            .post(format!("{}/v1/predictions", self.base_url))
            .bearer_auth(token)
            .header("Prefer", "wait")
            .json(&json!({ "version": version, "input": input }))
            .send()
            .await
            .context("Fallo la petición a Replicate")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(300).collect();
            return Err(
                TuxError::Provider(format!("Replicate respondió {}: {}", status, excerpt)).into(),
            );
        }

        let prediction: Prediction = resp
            .json()
            .await
            .context("Respuesta inválida de Replicate")?;
        if let Some(err) = prediction.error.filter(|e| !e.is_null()) {
            return Err(TuxError::Provider(format!("Replicate: {}", err)).into());
        }

        match prediction.output {
            Some(Value::String(url)) => Ok(url),
            Some(Value::Array(items)) => items
                .into_iter()
                .find_map(|v| v.as_str().map(str::to_string))
                .ok_or_else(|| TuxError::Provider("Replicate devolvió una lista vacía".to_string()).into()),
            _ => Err(TuxError::Provider(format!(
                "La predicción no terminó (status: {})",
                prediction.status.unwrap_or_default()
            ))
            .into()),
        }
    }
}

#[derive(Deserialize)]
struct Prediction {
    status: Option<String>,
    output: Option<Value>,
    error: Option<Value>,
}

fn screen_name(screen: &ScreenSpec) -> String {
    if screen.name.is_empty() {
        "Untitled Screen".to_string()
    } else {
        screen.name.clone()
    }
}

/// Prompt para el modelo de imagen, partes unidas por ", ".
pub fn build_mockup_prompt(screen: &ScreenSpec, style: &str) -> String {
    let name = if screen.name.is_empty() {
        "App Screen"
    } else {
        screen.name.as_str()
    };
    let mut parts = vec![
        format!("{} UI mockup design", style),
        format!("screen name: {}", name),
        screen.description.clone(),
    ];

    if !screen.elements.is_empty() {
        let elements: Vec<&str> = screen
            .elements
            .iter()
            .take(MAX_PROMPT_ELEMENTS)
            .map(String::as_str)
            .collect();
        parts.push(format!("UI elements: {}", elements.join(", ")));
    }

    if let Some(modifier) = style_modifier(style) {
        parts.push(modifier.to_string());
    }
    parts.extend(QUALITY_PHRASES.iter().map(|p| p.to_string()));
    parts.join(", ")
}

fn style_modifier(style: &str) -> Option<&'static str> {
    match style.to_lowercase().as_str() {
        "clean wireframe" => {
            Some("minimal black and white wireframe, simple lines, no colors, schematic")
        }
        "modern ui" => Some("modern flat design, material design, clean interface, professional"),
        "colorful mockup" => {
            Some("vibrant colors, modern UI design, clean layout, professional app interface")
        }
        "dark mode" => Some("dark theme UI, modern interface, high contrast, elegant design"),
        "mobile app" => Some("mobile app interface, iOS/Android style, touch-friendly, responsive"),
        _ => None,
    }
}

pub fn html_fallback_mockup(screen: &ScreenSpec) -> MockupImage {
    let elements_html: String = screen
        .elements
        .iter()
        .map(|e| format!("<div class=\"element\">{}</div>\n", htmlescape::encode_minimal(e)))
        .collect();
    let name = if screen.name.is_empty() {
        "Screen"
    } else {
        screen.name.as_str()
    };
    let html = format!(
        r#"<div class="mockup-container">
    <h2>{}</h2>
    <p>{}</p>
    <div class="elements">
{}    </div>
</div>"#,
        htmlescape::encode_minimal(name),
        htmlescape::encode_minimal(&screen.description),
        elements_html
    );

    MockupImage {
        screen_id: screen.slug(),
        screen_name: screen_name(screen),
        description: screen.description.clone(),
        image_url: None,
        image_format: None,
        html_content: Some(html),
        generation_method: "html_fallback".to_string(),
        prompt_used: None,
        generated_at: Utc::now().to_rfc3339(),
        elements: screen.elements.clone(),
        style: None,
    }
}
