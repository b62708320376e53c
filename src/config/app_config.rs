//! config/app_config.rs
//! Configuración global leída del entorno (.env + variables del proceso).

use std::{env, path::PathBuf, str::FromStr, time::Duration};

const PLACEHOLDER_ANTHROPIC_KEY: &str = "your_anthropic_api_key_here";

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173,http://localhost:5175,http://127.0.0.1:5175";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Proveedor de texto solicitado por `LLM_PROVIDER`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderPreference {
    Auto,
    Anthropic,
    OpenAi,
    Fallback,
}

/// Llaves de proveedores externos. `None` = no configurado.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub anthropic: Option<String>,
    pub openai: Option<String>,
    pub huggingface: Option<String>,
    pub together: Option<String>,
    pub replicate: Option<String>,
}

/// Hosts alternativos de los proveedores. `None` = host oficial.
#[derive(Debug, Clone, Default)]
pub struct ProviderBaseUrls {
    pub anthropic: Option<String>,
    pub openai: Option<String>,
    pub replicate: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub max_requests: u32,
    pub window: Duration,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub environment: Environment,
    pub workers: Option<usize>,
    pub cors_origins: Vec<String>,
    pub api_keys: ApiKeys,
    pub base_urls: ProviderBaseUrls,
    pub llm_provider: ProviderPreference,
    pub default_llm_model: Option<String>,
    pub default_vision_model: String,
    pub session_storage_path: PathBuf,
    pub export_storage_path: PathBuf,
    pub database_url: String,
    pub use_local_models: bool,
    pub local_models_path: PathBuf,
    pub enable_request_caching: bool,
    pub cache_duration: Duration,
    pub enable_cost_tracking: bool,
    pub rate_limit: RateLimitSettings,
    pub max_concurrent_requests: usize,
    pub request_timeout: Duration,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 8000,
            environment: Environment::Development,
            workers: None,
            cors_origins: split_list(DEFAULT_CORS_ORIGINS),
            api_keys: ApiKeys::default(),
            base_urls: ProviderBaseUrls::default(),
            llm_provider: ProviderPreference::Auto,
            default_llm_model: None,
            default_vision_model: "stable-diffusion-xl".to_string(),
            session_storage_path: PathBuf::from("sessions"),
            export_storage_path: PathBuf::from("exports"),
            database_url: "sqlite:data/tux.db".to_string(),
            use_local_models: false,
            local_models_path: PathBuf::from("models"),
            enable_request_caching: true,
            cache_duration: Duration::from_secs(60 * 60),
            enable_cost_tracking: true,
            rate_limit: RateLimitSettings {
                enabled: false,
                max_requests: 100,
                window: Duration::from_secs(60),
            },
            max_concurrent_requests: 10,
            request_timeout: Duration::from_secs(60),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Settings {
    /// Lee la configuración del entorno del proceso.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente arbitraria (útil en tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = match get("ENVIRONMENT").as_deref().map(str::to_lowercase) {
            Some(ref v) if v == "production" || v == "prod" => Environment::Production,
            _ => Environment::Development,
        };

        let llm_provider = match get("LLM_PROVIDER").as_deref().map(str::to_lowercase) {
            Some(ref v) if v == "anthropic" || v == "claude" => ProviderPreference::Anthropic,
            Some(ref v) if v == "openai" => ProviderPreference::OpenAi,
            Some(ref v) if v == "fallback" || v == "none" => ProviderPreference::Fallback,
            _ => ProviderPreference::Auto,
        };

        let (log_level, log_format) = Self::logging_from_lookup(&lookup);

        let api_keys = ApiKeys {
            anthropic: get("ANTHROPIC_API_KEY").filter(|k| k != PLACEHOLDER_ANTHROPIC_KEY),
            openai: get("OPENAI_API_KEY"),
            huggingface: get("HUGGINGFACE_API_KEY"),
            together: get("TOGETHER_API_KEY"),
            replicate: get("REPLICATE_API_TOKEN"),
        };

        let cache_minutes: u64 = parse_or("CACHE_DURATION_MINUTES", get("CACHE_DURATION_MINUTES"), 60);
        let window_secs: u64 =
            parse_or("RATE_LIMIT_WINDOW_SECONDS", get("RATE_LIMIT_WINDOW_SECONDS"), 60);
        let timeout_secs: u64 =
            parse_or("REQUEST_TIMEOUT_SECONDS", get("REQUEST_TIMEOUT_SECONDS"), 60);

        Settings {
            port: parse_or("PORT", get("PORT"), defaults.port),
            environment,
            workers: get("WORKERS").and_then(|w| match w.parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    log::warn!("WORKERS inválido ({}), se usa el valor por defecto", w);
                    None
                }
            }),
            cors_origins: get("CORS_ORIGINS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.cors_origins),
            api_keys,
            base_urls: ProviderBaseUrls {
                anthropic: get("ANTHROPIC_BASE_URL"),
                openai: get("OPENAI_BASE_URL"),
                replicate: get("REPLICATE_BASE_URL"),
            },
            llm_provider,
            default_llm_model: get("DEFAULT_LLM_MODEL"),
            default_vision_model: get("DEFAULT_VISION_MODEL").unwrap_or(defaults.default_vision_model),
            session_storage_path: get("SESSION_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_storage_path),
            export_storage_path: get("EXPORT_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_storage_path),
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            use_local_models: parse_bool("USE_LOCAL_MODELS", get("USE_LOCAL_MODELS"), false),
            local_models_path: get("LOCAL_MODELS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.local_models_path),
            enable_request_caching: parse_bool(
                "ENABLE_REQUEST_CACHING",
                get("ENABLE_REQUEST_CACHING"),
                true,
            ),
            cache_duration: Duration::from_secs(cache_minutes.max(1) * 60),
            enable_cost_tracking: parse_bool(
                "ENABLE_COST_TRACKING",
                get("ENABLE_COST_TRACKING"),
                true,
            ),
            rate_limit: RateLimitSettings {
                enabled: parse_bool("RATE_LIMIT_ENABLED", get("RATE_LIMIT_ENABLED"), false),
                max_requests: parse_or(
                    "RATE_LIMIT_REQUESTS",
                    get("RATE_LIMIT_REQUESTS"),
                    defaults.rate_limit.max_requests,
                ),
                window: Duration::from_secs(window_secs.max(1)),
            },
            max_concurrent_requests: parse_or::<usize>(
                "MAX_CONCURRENT_REQUESTS",
                get("MAX_CONCURRENT_REQUESTS"),
                defaults.max_concurrent_requests,
            )
            .max(1),
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
            log_level,
            log_format,
        }
    }

    /// Nivel y formato de logs; se leen antes que el resto para que el logger
    /// ya exista cuando `from_env` advierte valores inválidos.
    pub fn logging_from_env() -> (String, LogFormat) {
        Self::logging_from_lookup(|key| env::var(key).ok())
    }

    pub fn logging_from_lookup<F>(lookup: F) -> (String, LogFormat)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
        };
        let level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let format = match get("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        (level, format)
    }

    /// Workers del HttpServer: explícito, 1 en desarrollo, o el default de actix.
    pub fn worker_count(&self) -> Option<usize> {
        match (self.workers, self.environment) {
            (Some(n), _) => Some(n),
            (None, Environment::Development) => Some(1),
            (None, Environment::Production) => None,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(v) => v.parse().unwrap_or_else(|_| {
            log::warn!("Valor inválido para {}: '{}', usando default", key, v);
            default
        }),
    }
}

fn parse_bool(key: &str, raw: Option<String>, default: bool) -> bool {
    match raw.as_deref().map(str::to_lowercase).as_deref() {
        None => default,
        Some("true") | Some("1") | Some("yes") | Some("on") => true,
        Some("false") | Some("0") | Some("no") | Some("off") => false,
        Some(other) => {
            log::warn!("Valor booleano inválido para {}: '{}'", key, other);
            default
        }
    }
}
