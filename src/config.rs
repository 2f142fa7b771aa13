use crate::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scrape: ScrapeConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub from_year: i32,
    pub to_year: i32,
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub delay_ms: u64,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            from_year: crate::constants::DEFAULT_FROM_YEAR,
            to_year: crate::constants::DEFAULT_TO_YEAR,
            output_dir: "output".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            delay_ms: 250,
            timeout_seconds: 30,
            // Box Office Mojo rejects the default client UA
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_content = fs::read_to_string(CONFIG_PATH).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                CONFIG_PATH, e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Load `config.toml` when present, otherwise fall back to the built-in
    /// defaults. A present-but-invalid file is still an error.
    pub fn load_or_default() -> Result<Self> {
        if Path::new(CONFIG_PATH).exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }
}
