use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use tracing::info;

use crate::app_system::AppError;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub mock_fallback: bool,
    pub session_file: PathBuf,
    pub mock_latency: Duration,
    pub http_timeout: Duration,
    pub poll_interval: Duration,
    pub channel_buffer: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();
        let config = Self::from_lookup(|name| std::env::var(name).ok())?;
        info!(api = %config.api_base_url, mock_fallback = config.mock_fallback, "Configuration loaded");
        Ok(config)
    }

    /// Build from any variable source. Unset variables take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let api_base_url = get("PICKUPKART_API_URL", "http://localhost:8080/api")
            .trim_end_matches('/')
            .to_string();
        if api_base_url.is_empty() {
            return Err(AppError::Config("PICKUPKART_API_URL is empty".to_string()));
        }

        Ok(Self {
            api_base_url,
            mock_fallback: parse(&lookup, "PICKUPKART_MOCK_FALLBACK", true)?,
            session_file: PathBuf::from(get("PICKUPKART_SESSION_FILE", ".pickupkart_session.json")),
            mock_latency: Duration::from_millis(parse(&lookup, "PICKUPKART_MOCK_LATENCY_MS", 300)?),
            http_timeout: Duration::from_secs(parse(&lookup, "PICKUPKART_HTTP_TIMEOUT_SECS", 10)?),
            poll_interval: Duration::from_secs(parse(&lookup, "PICKUPKART_POLL_INTERVAL_SECS", 30)?),
            channel_buffer: match parse(&lookup, "PICKUPKART_CHANNEL_BUFFER", 32usize)? {
                0 => return Err(AppError::Config("PICKUPKART_CHANNEL_BUFFER must be at least 1".to_string())),
                n => n,
            },
        })
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e))),
    }
}
