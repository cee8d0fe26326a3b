//! Configuration: `config.toml` in the user config dir, then environment overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::import::{ImportMode, PhoneFormatter};

/// Environment variable names
mod env {
    pub const BACKEND_URL: &str = "GUESTLIST_BACKEND_URL";
    pub const API_KEY: &str = "GUESTLIST_API_KEY";
    pub const GUESTS_TABLE: &str = "GUESTLIST_GUESTS_TABLE";
    pub const CALLING_CODE: &str = "GUESTLIST_CALLING_CODE";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the hosted backend project
    pub backend_url: Option<String>,
    /// API key sent with every backend request
    pub api_key: Option<String>,
    pub guests_table: String,
    /// Calling code applied to local phone numbers, digits only
    pub default_calling_code: String,
    /// Import mode used when `--mode` is not given
    pub default_mode: ImportMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            api_key: None,
            guests_table: "guests".to_string(),
            default_calling_code: "234".to_string(),
            default_mode: ImportMode::BestEffort,
        }
    }
}

/// Resolved connection settings for the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub guests_table: String,
}

impl Config {
    /// Default location: `<config dir>/guestlist/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("guestlist").join("config.toml"))
    }

    /// Load from the default path (if present), `.env` and the process environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }

        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(env::BACKEND_URL) {
            self.backend_url = Some(url);
        }
        if let Some(key) = lookup(env::API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(table) = lookup(env::GUESTS_TABLE) {
            self.guests_table = table;
        }
        if let Some(code) = lookup(env::CALLING_CODE) {
            self.default_calling_code = code;
        }
    }

    pub fn phone_formatter(&self) -> PhoneFormatter {
        PhoneFormatter::new(&self.default_calling_code)
    }

    /// Backend settings, or an error naming what is missing
    pub fn backend(&self) -> Result<BackendConfig> {
        let url = self.backend_url.clone().with_context(|| {
            format!("Backend URL not configured. Set {} or backend_url in config.toml", env::BACKEND_URL)
        })?;
        let api_key = self.api_key.clone().with_context(|| {
            format!("API key not configured. Set {} or api_key in config.toml", env::API_KEY)
        })?;

        Ok(BackendConfig {
            url,
            api_key,
            guests_table: self.guests_table.clone(),
        })
    }
}
