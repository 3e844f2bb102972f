use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_SCRAPE_API_BASE: &str = "http://127.0.0.1:8001";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Invalid SCRAPE_TIMEOUT_SECS (expected a positive integer): {0}")]
    InvalidTimeout(String),
}

/// `APP_ENV=production`: JSON logs and restrictive CORS.
pub fn is_production<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup("APP_ENV").as_deref() == Some("production")
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Base URL of the scraping backend; `/api/scrape` is joined onto it.
    pub scrape_api_base: String,
    /// `None` keeps the HTTP client's default behaviour.
    pub request_timeout: Option<Duration>,
    pub is_dev: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `SERVER_HOST`/`SERVER_PORT` win
    /// over the platform-style `HOST`/`PORT`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_dev = !is_production(&lookup);

        let server_host = lookup("SERVER_HOST")
            .or_else(|| lookup("HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let server_port = match lookup("SERVER_PORT").or_else(|| lookup("PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let request_timeout = match lookup("SCRAPE_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => None,
        };

        Ok(Config {
            server_host,
            server_port,
            scrape_api_base: lookup("SCRAPE_API_BASE")
                .unwrap_or_else(|| DEFAULT_SCRAPE_API_BASE.to_string()),
            request_timeout,
            is_dev,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
