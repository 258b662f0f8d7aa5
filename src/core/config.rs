use anyhow::{Context, Result};
use chrono::Locale;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::period::parse_locale;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceEndpoint {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServicesConfig {
    pub accounts: ServiceEndpoint,
    pub credits: ServiceEndpoint,
    pub transactions: ServiceEndpoint,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        ServicesConfig {
            accounts: ServiceEndpoint {
                base_url: "http://localhost:8082".to_string(),
            },
            credits: ServiceEndpoint {
                base_url: "http://localhost:8083".to_string(),
            },
            transactions: ServiceEndpoint {
                base_url: "http://localhost:8084".to_string(),
            },
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> usize {
    2
}

fn default_retry_delay_ms() -> u64 {
    250
}

fn default_locale() -> String {
    "es_ES".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    /// Upper bound for each sibling service call of a report. Must be at least 1.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    #[serde(default = "default_locale")]
    pub locale: String,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            services: ServicesConfig::default(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            locale: default_locale(),
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "bank", "custagg")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("com", "bank", "custagg")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn locale(&self) -> Result<Locale> {
        parse_locale(&self.locale)
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .locale()
            .with_context(|| format!("Invalid locale in {}", path.as_ref().display()))?;
        anyhow::ensure!(
            config.timeout_secs > 0,
            "Invalid timeout_secs in {}: must be at least 1",
            path.as_ref().display()
        );
        debug!("Successfully loaded config");
        Ok(config)
    }
}
