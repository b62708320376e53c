//! services/screen_service.rs
//! Layouts HTML editables y mockups por pantalla.

use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use chrono::Utc;
use serde_json::{json, Value};

use crate::models::screen_model::{
    EditableElement, GeneratedScreen, GenerationMode, MockupImage, Position,
    ScreenGenerationRequest, ScreenGenerationResponse, ScreenSpec,
};
use crate::services::llm_service::LlmService;
use crate::services::vision_service::VisionService;

pub const DEFAULT_VARIATION_STYLES: [&str; 3] = ["clean wireframe", "modern ui", "dark mode"];

#[derive(Clone)]
pub struct ScreenService {
    llm: LlmService,
    vision: VisionService,
}

impl ScreenService {
    pub fn new(llm: LlmService, vision: VisionService) -> Self {
        ScreenService { llm, vision }
    }

    pub async fn generate_screens(
        &self,
        req: &ScreenGenerationRequest,
    ) -> Result<ScreenGenerationResponse> {
        let mode = req.generation_mode;
        log::info!(
            "Generando {} pantallas en modo {}",
            req.screens.len(),
            mode.as_str()
        );

        let mut screens = Vec::new();
        if mode.wants_html() {
            for spec in &req.screens {
                let html = self.html_layout(spec, &req.ui_standards).await;
                screens.push(GeneratedScreen {
                    id: screen_id(&spec.name),
                    name: spec.name.clone(),
                    description: spec.description.clone(),
                    html_layout: Some(html),
                    elements: create_editable_elements(&spec.elements),
                    mockup_url: None,
                    generation_method: None,
                    created_at: Utc::now().to_rfc3339(),
                });
                log::info!("Layout HTML generado para {}", spec.name);
            }
        }

        let mut mockups: Vec<MockupImage> = Vec::new();
        if mode.wants_images() {
            let specs: Vec<ScreenSpec> = req
                .screens
                .iter()
                .map(|s| ScreenSpec {
                    id: Some(screen_id(&s.name)),
                    ..s.clone()
                })
                .collect();
            mockups = self
                .vision
                .generate_mockup_images(&specs, &req.image_style)
                .await;

            match mode {
                GenerationMode::Image => {
                    screens.extend(mockups.iter().map(mockup_to_screen));
                }
                GenerationMode::Hybrid => {
                    for (screen, mockup) in screens.iter_mut().zip(&mockups) {
                        screen.mockup_url = mockup.image_url.clone();
                        screen.generation_method = Some("hybrid".to_string());
                    }
                }
                GenerationMode::Html => {}
            }
            log::info!("{} mockups generados", mockups.len());
        }

        if screens.is_empty() {
            return Err(anyhow!("Failed to generate any screens"));
        }

        Ok(ScreenGenerationResponse {
            total_screens: screens.len(),
            screens,
            generated_at: Utc::now().to_rfc3339(),
            generation_method: mode.as_str().to_string(),
            mockup_images: mockups,
        })
    }

    /// Una variación por estilo; `None` usa los estilos por defecto.
    pub async fn image_variations(
        &self,
        screen: &ScreenSpec,
        styles: Option<&[String]>,
    ) -> Vec<MockupImage> {
        let defaults: Vec<String> = DEFAULT_VARIATION_STYLES
            .iter()
            .map(|s| s.to_string())
            .collect();
        let styles = styles.unwrap_or(defaults.as_slice());
        self.vision.generate_style_variations(screen, styles).await
    }

    async fn html_layout(&self, spec: &ScreenSpec, ui_standards: &str) -> String {
        if !self.llm.is_available() {
            return fallback_screen_html(spec);
        }
        let prompt = html_prompt(spec, ui_standards);
        self.llm.generate_html_layout(&prompt).await.trim().to_string()
    }
}

/// `screen_` + nombre en minúsculas con `_` en lugar de espacios.
pub fn screen_id(name: &str) -> String {
    format!("screen_{}", name.to_lowercase().replace(' ', "_"))
}

fn mockup_to_screen(mockup: &MockupImage) -> GeneratedScreen {
    GeneratedScreen {
        id: mockup.screen_id.clone(),
        name: mockup.screen_name.clone(),
        description: mockup.description.clone(),
        html_layout: Some(mockup.html_content.clone().unwrap_or_default()),
        elements: create_editable_elements(&mockup.elements),
        mockup_url: mockup.image_url.clone(),
        generation_method: Some(mockup.generation_method.clone()),
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Tipo de elemento por palabra clave; gana la primera regla que coincide.
pub fn determine_element_type(element: &str) -> &'static str {
    const RULES: [(&str, &[&str]); 6] = [
        ("button", &["button", "btn", "submit", "action"]),
        ("input", &["input", "field", "form", "text"]),
        ("image", &["image", "img", "photo", "picture"]),
        ("header", &["header", "title", "heading"]),
        ("navigation", &["nav", "menu", "navigation"]),
        ("container", &["card", "container", "box"]),
    ];
    let lower = element.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(kind, _)| *kind)
        .unwrap_or("text")
}

pub fn create_editable_elements(elements: &[String]) -> Vec<EditableElement> {
    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            let element_type = determine_element_type(element);
            let is_button = element_type == "button";
            let styles: BTreeMap<String, String> = [
                ("width", "auto"),
                ("height", "auto"),
                ("backgroundColor", if is_button { "#3b82f6" } else { "#ffffff" }),
                ("color", if is_button { "#ffffff" } else { "#000000" }),
                ("padding", "8px 16px"),
                ("borderRadius", "6px"),
                ("border", "1px solid #e5e7eb"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

            let offset = i as i64;
            EditableElement {
                id: format!("element_{}_{}", i, element.to_lowercase().replace(' ', "_")),
                element_type: element_type.to_string(),
                content: element.clone(),
                position: Position {
                    x: 50 + offset * 20,
                    y: 100 + offset * 80,
                },
                styles,
            }
        })
        .collect()
}

/// Respuesta de `GET /screens/{id}/html`. Las pantallas no se guardan.
pub fn screen_html(screen_id: &str) -> Value {
    json!({
        "screen_id": screen_id,
        "html": "<div>Screen HTML would be here</div>",
    })
}

pub fn update_element(screen_id: &str, changes: Value) -> Value {
    json!({
        "screen_id": screen_id,
        "updated": true,
        "changes": changes,
    })
}

fn html_prompt(spec: &ScreenSpec, ui_standards: &str) -> String {
    format!(
        r#"Generate a complete HTML layout for a screen called "{}".

Description: {}
Required Elements: {}
UI Standards: {}

Requirements:
1. Create a complete HTML layout with inline CSS styles
2. Use modern, professional design principles
3. Make it responsive and accessible
4. Include proper semantic HTML structure
5. Use a clean, modern color scheme
6. Ensure proper spacing and typography
7. Make elements easily identifiable for editing
8. Include proper CSS Grid/Flexbox layouts

Return ONLY the HTML code with inline styles, no explanations.
The HTML should be production-ready and pixel-perfect."#,
        spec.name,
        spec.description,
        spec.elements.join(", "),
        ui_standards
    )
}

/// Plantilla local: cabecera, descripción y un bloque por elemento.
pub fn fallback_screen_html(spec: &ScreenSpec) -> String {
    let blocks: String = spec.elements.iter().map(|e| element_block(e)).collect();
    format!(
        r#"<div class="screen-container" style="width: 100%; min-height: 100vh; background: #f8fafc; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;">
    <header style="background: #3b82f6; color: white; padding: 1rem 2rem; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
        <h1 style="margin: 0; font-size: 1.5rem; font-weight: 600;">{}</h1>
    </header>
    <main style="padding: 2rem; max-width: 1200px; margin: 0 auto;">
        <div style="background: white; border-radius: 8px; padding: 2rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); margin-bottom: 2rem;">
            <h2 style="margin: 0 0 1rem 0; color: #1f2937; font-size: 1.25rem;">{}</h2>
            <div style="display: grid; gap: 1rem; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));">
{}            </div>
        </div>
    </main>
</div>"#,
        htmlescape::encode_minimal(&spec.name),
        htmlescape::encode_minimal(&spec.description),
        blocks
    )
}

fn element_block(element: &str) -> String {
    let lower = element.to_lowercase();
    let label = htmlescape::encode_minimal(element);
    if lower.contains("button") {
        format!(
            "                <button style=\"background: #10b981; color: white; border: none; border-radius: 6px; padding: 0.75rem 1.5rem; font-weight: 500; cursor: pointer;\">{}</button>\n",
            label
        )
    } else if lower.contains("input") || lower.contains("form") {
        format!(
            "                <div style=\"margin-bottom: 1rem;\"><label style=\"display: block; margin-bottom: 0.5rem; font-weight: 500; color: #374151;\">{}</label><input type=\"text\" placeholder=\"Enter {}\" style=\"width: 100%; padding: 0.75rem; border: 1px solid #d1d5db; border-radius: 6px; font-size: 1rem;\"></div>\n",
            label,
            htmlescape::encode_minimal(&lower)
        )
    } else if lower.contains("text") || lower.contains("paragraph") {
        format!(
            "                <p style=\"color: #6b7280; line-height: 1.6; margin-bottom: 1rem;\">{}: Lorem ipsum dolor sit amet, consectetur adipiscing elit.</p>\n",
            label
        )
    } else {
        format!(
            "                <div style=\"background: #f3f4f6; border: 1px solid #e5e7eb; border-radius: 6px; padding: 1rem; margin-bottom: 1rem;\"><h3 style=\"margin: 0 0 0.5rem 0; color: #111827; font-size: 1.125rem;\">{}</h3><p style=\"margin: 0; color: #6b7280; font-size: 0.875rem;\">Placeholder content for {}</p></div>\n",
            label, label
        )
    }
}
