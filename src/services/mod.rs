//! services/mod.rs
//! Capas de negocio de la app.

pub mod analytics_service;
pub mod cost_tracker;
pub mod export_service;
pub mod fallback_content;
pub mod health_service;
pub mod llm_client;
pub mod llm_service;
pub mod model_catalog;
pub mod question_service;
pub mod request_cache;
pub mod requirements_service;
pub mod screen_service;
pub mod session_service;
pub mod ux_generator;
pub mod vision_service;
