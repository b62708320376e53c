//! models/export_model.rs

use serde::Deserialize;
use serde_json::Value;

fn default_project_name() -> String {
    "TUX Project".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub screens: Vec<Value>,
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default)]
    pub ux_specs: Option<Value>,
    #[serde(default)]
    pub requirements: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleScreenExportRequest {
    pub screen: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Json,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
        }
    }
}
