use std::str::FromStr;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::app::Services;
use crate::config::app_config::Settings;
use crate::logger::init_logger;
use crate::middleware::rate_limit::RateLimiter;

mod app;
mod config;
mod error;
mod handlers;
mod logger;
mod middleware;
mod models;
mod services;
#[cfg(test)]
mod tests;

async fn setup_database(database_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    // Carpeta del archivo de la base, p. ej. "data" en sqlite:data/tux.db
    if let Some(parent) = database_url
        .strip_prefix("sqlite:")
        .map(|p| std::path::Path::new(p.trim_start_matches("//")))
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("No se pudo crear el directorio {:?}", parent))?;
    }

    log::info!("Conectando a SQLite en {}", database_url);
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("DATABASE_URL inválido: {}", database_url))?
        .create_if_missing(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("No se pudo conectar a la base de datos SQLite")?;
    Ok(db_pool)
}

fn cors(settings: &Settings) -> Cors {
    if settings.allows_any_origin() {
        return Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
    }
    settings
        .cors_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    let (log_level, log_format) = Settings::logging_from_env();
    init_logger(&log_level, log_format);
    let settings = Settings::from_env();
    log::debug!("Logs: nivel {}, formato {:?}", settings.log_level, settings.log_format);

    let db_pool = setup_database(&settings.database_url).await?;
    let services = Services::build(&settings, db_pool)?;
    services
        .analytics
        .run_migrations()
        .await
        .context("Fallo en migraciones de 'analytics_events'")?;

    let rate_limiter = RateLimiter::new(settings.rate_limit.clone());
    if rate_limiter.is_enabled() {
        let _cleanup = rate_limiter.start_cleanup_task();
        log::info!(
            "Rate limit: {} peticiones cada {}s",
            settings.rate_limit.max_requests,
            settings.rate_limit.window.as_secs()
        );
    }

    let port = settings.port;
    log::info!("Levantando servidor en 0.0.0.0:{}", port);
    let server_settings = settings.clone();
    let mut server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            // el último wrap es el más externo
            .wrap(rate_limiter.clone())
            .wrap(Logger::default())
            .wrap(cors(&server_settings))
            .configure(|cfg| services.register(cfg))
            .configure(app::init_app)
    });
    if let Some(workers) = settings.worker_count() {
        server = server.workers(workers);
    }

    server
        .bind(("0.0.0.0", port))
        .with_context(|| format!("No se pudo abrir el puerto {}", port))?
        .run()
        .await?;
    Ok(())
}
