//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod analytics_model;
pub mod catalog_model;
pub mod cost_model;
pub mod design_model;
pub mod export_model;
pub mod health_model;
pub mod question_model;
pub mod requirements_model;
pub mod screen_model;
pub mod session_model;
