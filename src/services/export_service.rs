//! services/export_service.rs
//! Documentos descargables (HTML, JSON, SVG) a partir de pantallas.

use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::TuxError;
use crate::models::export_model::ExportFormat;

const SVG_DESCRIPTION_CHARS: usize = 60;
const SVG_LABEL_CHARS: usize = 20;
const SVG_MAX_ELEMENTS: usize = 8;
const SAVE_ATTEMPTS: usize = 5;

#[derive(Clone, Debug)]
pub struct ExportService {
    dir: PathBuf,
}

impl ExportService {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("No se pudo crear el directorio de exports {:?}", dir))?;
        Ok(ExportService { dir })
    }

    pub fn export_html(&self, screens: &[Value], project_name: &str) -> String {
        let mut parts = vec![html_header(project_name), navigation(screens)];
        parts.extend(
            screens
                .iter()
                .enumerate()
                .map(|(i, screen)| screen_section(screen, i)),
        );
        parts.push(HTML_FOOTER.to_string());
        parts.join("\n")
    }

    pub fn export_json(
        &self,
        screens: &[Value],
        ux_specs: Option<&Value>,
        requirements: Option<&Value>,
    ) -> Result<String> {
        let doc = json!({
            "export_version": "1.0",
            "exported_at": Utc::now().to_rfc3339(),
            "tux_version": env!("CARGO_PKG_VERSION"),
            "data": {
                "requirements": requirements,
                "ux_specifications": ux_specs,
                "screens": screens,
            }
        });
        serde_json::to_string_pretty(&doc).context("No se pudo serializar el export JSON")
    }

    pub fn export_svg(&self, screen: &Value) -> String {
        let name = str_field(screen, "name").unwrap_or("Screen");
        let description = str_field(screen, "description").unwrap_or("");

        let mut svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 800 600" width="800" height="600">
    <rect width="800" height="600" fill="#f8fafc"/>
    <rect x="0" y="0" width="800" height="80" fill="#3b82f6"/>
    <text x="400" y="45" text-anchor="middle" font-family="Arial, sans-serif" font-size="24" font-weight="bold" fill="white">{}</text>
    <text x="400" y="110" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="#6b7280">{}</text>
    <rect x="40" y="140" width="720" height="400" fill="white" stroke="#e5e7eb" stroke-width="2" rx="8"/>
    <g transform="translate(60, 160)">"##,
            htmlescape::encode_minimal(name),
            htmlescape::encode_minimal(&truncate(description, SVG_DESCRIPTION_CHARS)),
        );

        let elements = screen
            .get("elements")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        for (i, element) in elements.iter().take(SVG_MAX_ELEMENTS).enumerate() {
            let label = match element {
                Value::Object(_) => str_field(element, "content")
                    .unwrap_or("Element")
                    .to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let y = i * 50;
            svg.push_str(&format!(
                r##"
        <rect x="0" y="{}" width="200" height="40" fill="#e0e7ff" rx="4"/>
        <text x="100" y="{}" text-anchor="middle" font-family="Arial, sans-serif" font-size="14" fill="#4338ca">{}</text>"##,
                y,
                y + 25,
                htmlescape::encode_minimal(&truncate(&label, SVG_LABEL_CHARS))
            ));
        }

        svg.push_str(
            r##"
    </g>
    <text x="400" y="570" text-anchor="middle" font-family="Arial, sans-serif" font-size="12" fill="#9ca3af">Generated by TUX - AI-Powered UX Design</text>
</svg>"##,
        );
        svg
    }

    /// Guarda en `{dir}/{nombre}_{timestamp}.{ext}` y devuelve la ruta.
    /// Si ya existe un archivo con ese nombre se agrega un sufijo aleatorio.
    pub async fn save_export(
        &self,
        content: &str,
        filename: &str,
        format: ExportFormat,
    ) -> Result<PathBuf> {
        let stem = format!(
            "{}_{}",
            sanitize_filename(filename),
            Utc::now().format("%Y%m%d_%H%M%S")
        );

        let mut candidate = format!("{}.{}", stem, format.extension());
        for _ in 0..SAVE_ATTEMPTS {
            let path = self.dir.join(&candidate);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(content.as_bytes())
                        .await
                        .with_context(|| format!("No se pudo guardar el export en {:?}", path))?;
                    file.flush().await?;
                    log::info!("Export guardado en {:?}", path);
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    let suffix = Uuid::new_v4().simple().to_string();
                    candidate = format!("{}_{}.{}", stem, &suffix[..8], format.extension());
                }
                Err(e) => {
                    return Err(anyhow::Error::from(e)
                        .context(format!("No se pudo crear el export {:?}", path)))
                }
            }
        }
        Err(TuxError::Storage(format!("No hay nombre libre para el export {}", stem)).into())
    }
}

/// Espacios a `_`; fuera de `[A-Za-z0-9_.-]` se descarta.
pub fn sanitize_filename(name: &str) -> String {
    let clean: String = name
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if clean.is_empty() {
        "export".to_string()
    } else {
        clean
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn screen_name(screen: &Value, index: usize) -> String {
    str_field(screen, "name")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Screen {}", index + 1))
}

fn navigation(screens: &[Value]) -> String {
    let links: Vec<String> = screens
        .iter()
        .enumerate()
        .map(|(i, screen)| {
            format!(
                r##"<a href="#screen-{}" class="nav-link">{}</a>"##,
                i,
                htmlescape::encode_minimal(&screen_name(screen, i))
            )
        })
        .collect();
    format!(
        r#"
        <div class="navigation">
            <h2>Screen Navigation</h2>
            <div class="nav-links">
                {}
            </div>
        </div>"#,
        links.join(" ")
    )
}

fn screen_section(screen: &Value, index: usize) -> String {
    let description = str_field(screen, "description").unwrap_or("No description provided");
    // el layout se incrusta tal cual
    let content = str_field(screen, "html_layout")
        .or_else(|| str_field(screen, "html_content"))
        .unwrap_or("<p>No content available</p>");

    let tags: Vec<String> = screen
        .get("elements")
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .map(|element| {
                    let label = match element {
                        Value::Object(_) => str_field(element, "content")
                            .or_else(|| str_field(element, "type"))
                            .unwrap_or("Unknown")
                            .to_string(),
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    format!(
                        r#"<span class="element-tag">{}</span>"#,
                        htmlescape::encode_minimal(&label)
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    let elements_html = if tags.is_empty() {
        String::new()
    } else {
        format!(
            r#"
            <div class="screen-elements">
                <h4>UI Elements</h4>
                <div class="elements-list">
                    {}
                </div>
            </div>"#,
            tags.join(" ")
        )
    };

    format!(
        r#"
        <div id="screen-{index}" class="screen-section">
            <div class="screen-header">
                <h3>{name}</h3>
                <p class="screen-description">{description}</p>
            </div>
            <div class="screen-content">
                {content}
            </div>
            {elements_html}
        </div>"#,
        index = index,
        name = htmlescape::encode_minimal(&screen_name(screen, index)),
        description = htmlescape::encode_minimal(description),
        content = content,
        elements_html = elements_html,
    )
}

fn html_header(project_name: &str) -> String {
    let name = htmlescape::encode_minimal(project_name);
    let exported_on = Utc::now().format("%B %d, %Y at %I:%M %p");
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name} - TUX UX Design</title>
    <style>{style}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{name}</h1>
            <p>UX Design Specifications - Generated by TUX</p>
            <p style="margin-top: 0.5rem; font-size: 0.875rem;">
                Exported on {exported_on}
            </p>
        </div>"#,
        name = name,
        style = EXPORT_STYLE,
        exported_on = exported_on,
    )
}

const EXPORT_STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background-color: #f8fafc; color: #1f2937; line-height: 1.6; }
        .container { max-width: 1200px; margin: 0 auto; padding: 2rem; }
        .header { text-align: center; margin-bottom: 3rem; }
        .header h1 { font-size: 2.5rem; color: #3b82f6; margin-bottom: 0.5rem; }
        .header p { color: #6b7280; font-size: 1.125rem; }
        .navigation { background: white; border-radius: 12px; padding: 1.5rem; margin-bottom: 2rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        .navigation h2 { font-size: 1.5rem; margin-bottom: 1rem; color: #1f2937; }
        .nav-links { display: flex; flex-wrap: wrap; gap: 1rem; }
        .nav-link { display: inline-block; padding: 0.75rem 1.5rem; background: #3b82f6; color: white; text-decoration: none; border-radius: 8px; transition: all 0.2s; }
        .nav-link:hover { background: #2563eb; transform: translateY(-2px); }
        .screen-section { background: white; border-radius: 12px; padding: 2rem; margin-bottom: 2rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
        .screen-header { border-bottom: 2px solid #e5e7eb; padding-bottom: 1rem; margin-bottom: 2rem; }
        .screen-header h3 { font-size: 1.875rem; color: #1f2937; margin-bottom: 0.5rem; }
        .screen-description { color: #6b7280; font-size: 1.125rem; }
        .screen-content { background: #f9fafb; border: 1px solid #e5e7eb; border-radius: 8px; padding: 2rem; margin-bottom: 1.5rem; min-height: 400px; }
        .screen-elements { margin-top: 1.5rem; }
        .screen-elements h4 { font-size: 1.25rem; color: #374151; margin-bottom: 1rem; }
        .elements-list { display: flex; flex-wrap: wrap; gap: 0.75rem; }
        .element-tag { display: inline-block; padding: 0.5rem 1rem; background: #e0e7ff; color: #4338ca; border-radius: 6px; font-size: 0.875rem; }
        .export-info { margin-top: 3rem; padding: 1.5rem; background: #f3f4f6; border-radius: 8px; text-align: center; color: #6b7280; }
        @media print { .navigation { display: none; } .screen-section { page-break-inside: avoid; } }"#;

const HTML_FOOTER: &str = r#"
        <div class="export-info">
            <p>This document was generated by TUX - AI-Powered UX Design Generator</p>
            <p>Visit <a href="https://tuxonline.live" style="color: #3b82f6;">tuxonline.live</a> to create your own UX designs</p>
        </div>
    </div>
</body>
</html>"#;
