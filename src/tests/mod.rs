//! tests/mod.rs
//! Helpers compartidos por las pruebas.

mod api_tests;
mod cost_tests;
mod screen_tests;
mod session_tests;
mod settings_tests;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tempfile::TempDir;

use crate::app::Services;
use crate::config::app_config::Settings;

/// Servicios sin llaves de proveedores (modo fallback) con storage temporal.
/// El `TempDir` debe vivir lo mismo que los servicios.
pub(crate) struct TestContext {
    pub services: Services,
    pub dir: TempDir,
}

// Una sola conexión: cada conexión a :memory: es una base distinta.
pub(crate) async fn memory_pool() -> Pool<Sqlite> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("no se pudo abrir sqlite en memoria")
}

pub(crate) fn test_settings(dir: &TempDir) -> Settings {
    Settings {
        session_storage_path: dir.path().join("sessions"),
        export_storage_path: dir.path().join("exports"),
        ..Settings::default()
    }
}

pub(crate) async fn test_context() -> TestContext {
    let dir = TempDir::new().expect("no se pudo crear el directorio temporal");
    let settings = test_settings(&dir);
    let services =
        Services::build(&settings, memory_pool().await).expect("no se pudieron crear los servicios");
    services
        .analytics
        .run_migrations()
        .await
        .expect("migraciones fallaron");
    TestContext { services, dir }
}
