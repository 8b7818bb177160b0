use std::{env, process, str::FromStr, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://localhost:4566/restapis";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Connection URL of the selected backend; empty for the memory store.
    pub endpoint: String,
    pub pool_size: u32,
}

/// Identifying attributes the gateway hands to every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayContext {
    pub api_id: Option<String>,
    pub stage: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
    pub file: Option<String>,
}

pub struct Config {
    pub base_url: String,
    pub server_addr: String,
    pub request_timeout: Duration,
    pub store: StoreConfig,
    pub gateway: GatewayContext,
}

impl Config {
    pub fn load() -> Self {
        let server_addr = get_env_or("SERVER_ADDRESS", "0.0.0.0:8080");

        let backend = get_env_or("STORE_BACKEND", "redis")
            .parse::<StoreBackend>()
            .unwrap_or_else(|e| {
                tracing::error!("{}", e);
                process::exit(1);
            });
        let endpoint = match backend {
            StoreBackend::Redis => get_env("REDIS_URL"),
            StoreBackend::Postgres => get_env("DATABASE_URL"),
            StoreBackend::Memory => String::new(),
        };
        let pool_size = get_parsed_or("STORE_POOL_SIZE", 10);

        let base_url = get_env_or("PUBLIC_BASE_URL", DEFAULT_BASE_URL);
        if let Err(e) = url::Url::parse(&base_url) {
            tracing::error!("PUBLIC_BASE_URL is not a valid URL ({}): {}", e, base_url);
            process::exit(1);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            server_addr,
            request_timeout: Duration::from_secs(get_parsed_or("REQUEST_TIMEOUT_SECS", 30)),
            store: StoreConfig {
                backend,
                endpoint,
                pool_size,
            },
            gateway: GatewayContext {
                api_id: non_empty_env("GATEWAY_API_ID"),
                stage: non_empty_env("GATEWAY_STAGE"),
            },
        }
    }
}

impl LogConfig {
    // Logging is configured before the subscriber exists, so nothing here may log.
    pub fn load() -> Self {
        Self {
            level: env::var("RUST_LOG")
                .or_else(|_| env::var("LOG_LEVEL"))
                .unwrap_or_else(|_| "info".to_string()),
            json: env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")),
            file: non_empty_env("LOG_FILE"),
        }
    }
}

fn get_env(var: &str) -> String {
    env::var(var).unwrap_or_else(|_| {
        tracing::error!("{} environment variable is required but not set.", var);
        process::exit(1);
    })
}

fn get_env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| {
        tracing::warn!(
            "{} environment variable not set, using default: {}",
            var,
            default
        );
        default.to_string()
    })
}

fn get_parsed_or<T>(var: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{} has an invalid value '{}', using default: {}", var, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}
