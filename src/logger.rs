//! logger.rs
//! Configuración del logger usando env_logger.

use std::io::Write;

use crate::config::app_config::LogFormat;

pub fn init_logger(level: &str, format: LogFormat) {
    // RUST_LOG tiene prioridad; si no está usamos LOG_LEVEL.
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    match format {
        LogFormat::Text => {
            builder.format_timestamp_secs();
        }
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "level": record.level().to_string(),
                    "target": record.target(),
                    "message": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
    }

    // try_init: en tests se puede llamar varias veces
    let _ = builder.try_init();
}
