use std::env;

/// Endpoint used when `TABBY_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001/v1";

/// Env var overriding the endpoint base address.
pub const BASE_URL_ENV: &str = "TABBY_API_URL";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base address including the version path, without trailing slash.
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TABBY_API_URL is not a valid URL ({url}): {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Load configuration from the environment.
pub fn load() -> Result<Config, ConfigError> {
    let raw = env::var(BASE_URL_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    Ok(Config {
        base_url: normalize_base_url(&raw)?,
    })
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}
