use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_DATABASE_PATH: &str = "surveys.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY must be set")]
    MissingApiKey,
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Startup configuration, read once from the environment and handed to the
/// pieces that need it.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub generation_timeout: Duration,
    pub database_path: PathBuf,
    pub bind_addr: String,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut settings = Self::new(api_key);

        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            settings.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("OPENAI_MODEL") {
            settings.model = model;
        }
        if let Some(raw) = lookup("GENERATION_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                name: "GENERATION_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            settings.generation_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = lookup("DATABASE_PATH") {
            settings.database_path = PathBuf::from(path);
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            settings.bind_addr = addr;
        }

        Ok(settings)
    }
}
