//! models/design_model.rs
//! Especificación UX generada a partir de los requerimientos.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInsight {
    pub designer: String,
    pub analyst: String,
    pub architect: String,
}

/// Las secciones que no tienen forma fija se guardan como JSON libre,
/// ya que vienen del proveedor o de las plantillas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UxSpecification {
    pub screens: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_insights: Option<RoleInsight>,
    pub component_library: Value,
    pub data_model: Value,
    pub interaction_patterns: Value,
    pub responsive_design: Value,
    pub seo_performance: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ia_structure: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standards: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct DesignModelQuery {
    pub model: Option<String>,
}
