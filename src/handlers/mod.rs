//! handlers/mod.rs
//! Handlers HTTP agrupados por área.
pub mod analytics_handler;
pub mod cost_handler;
pub mod design_handler;
pub mod export_handler;
pub mod health_handler;
pub mod model_handler;
pub mod question_handler;
pub mod requirements_handler;
pub mod screen_handler;
pub mod session_handler;
