use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub debug: bool,
    pub host: String,
    pub port: u16,
    /// Empty when unset; checked when the fact-check service is first built
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_retry_client_errors: bool,
    pub cors_origins: Vec<String>,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "AI-Powered Fact Checker API".to_string(),
            app_version: "1.0.0".to_string(),
            debug: false,
            host: "127.0.0.1".to_string(),
            port: 8000,
            gemini_api_key: String::new(),
            gemini_model: gemini_client::DEFAULT_MODEL.to_string(),
            gemini_base_url: gemini_client::DEFAULT_BASE_URL.to_string(),
            gemini_retry_client_errors: false,
            cors_origins: vec!["*".to_string()],
            cache_enabled: true,
            cache_ttl: Duration::from_secs(3600),
            cache_capacity: 256,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            app_version: lookup("APP_VERSION").unwrap_or(defaults.app_version),
            debug: parse_bool(lookup("DEBUG").as_deref())
                .context("DEBUG must be a boolean")?
                .unwrap_or(defaults.debug),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .map(|p| p.parse::<u16>())
                .transpose()
                .context("PORT must be a valid number")?
                .unwrap_or(defaults.port),
            gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: lookup("GEMINI_MODEL")
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(defaults.gemini_model),
            gemini_base_url: lookup("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_retry_client_errors: parse_bool(lookup("GEMINI_RETRY_CLIENT_ERRORS").as_deref())
                .context("GEMINI_RETRY_CLIENT_ERRORS must be a boolean")?
                .unwrap_or(defaults.gemini_retry_client_errors),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| parse_list(&raw))
                .filter(|origins| !origins.is_empty())
                .unwrap_or(defaults.cors_origins),
            cache_enabled: parse_bool(lookup("ANALYSIS_CACHE_ENABLED").as_deref())
                .context("ANALYSIS_CACHE_ENABLED must be a boolean")?
                .unwrap_or(defaults.cache_enabled),
            cache_ttl: lookup("ANALYSIS_CACHE_TTL_SECS")
                .map(|s| s.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("ANALYSIS_CACHE_TTL_SECS must be a number of seconds")?
                .unwrap_or(defaults.cache_ttl),
            cache_capacity: lookup("ANALYSIS_CACHE_CAPACITY")
                .map(|s| s.parse::<usize>())
                .transpose()
                .context("ANALYSIS_CACHE_CAPACITY must be a valid number")?
                .unwrap_or(defaults.cache_capacity),
        })
    }

    /// Bind address for the HTTP server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_bool(raw: Option<&str>) -> Result<Option<bool>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
        other => anyhow::bail!("invalid boolean: {}", other),
    }
}

/// Comma-separated list, blanks dropped. Accepts a JSON-style `["a","b"]` too.
fn parse_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|item| item.trim().trim_matches('"').trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
