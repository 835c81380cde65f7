//! # Configuration Management Module
//!
//! Type-safe TOML configuration for codexhunt with serde defaults for every
//! optional section, so a partial (or missing) file still yields a usable
//! setup.
//!
//! ## Configuration Structure
//!
//! - [`HuntConfig`] - player defaults and deferred-transition delays
//! - [`StorageConfig`] - snapshot location, save key, optional catalog seed
//! - [`LoggingConfig`] - log level and optional log file
//! - [`HintConfig`] - generative-AI hint collaborator
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codexhunt::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Save file key: {}", config.storage.save_key);
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [hunt]
//! username = "Guest_Engineer"
//! success_delay_ms = 2000
//! completion_delay_ms = 2500
//!
//! [storage]
//! data_dir = "./data"
//! save_key = "codex_save_v1"
//!
//! [hint]
//! enabled = true
//! model = "gemini-2.5-flash"
//! ```
//!
//! The hint API key may be left empty in the file and supplied through the
//! `API_KEY` environment variable instead, which takes precedence.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;

use crate::hunt::types::DEFAULT_USERNAME;
use crate::storage::DEFAULT_SAVE_KEY;

/// Environment variable that overrides `hint.api_key`.
pub const API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntConfig {
    /// Name given to a fresh snapshot
    #[serde(default = "default_username")]
    pub username: String,
    /// Pause between an accepted answer and the reward being applied
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,
    /// Pause between the reward and the return to the dashboard
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_success_delay_ms() -> u64 {
    2000
}

fn default_completion_delay_ms() -> u64 {
    2500
}

impl HuntConfig {
    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            success_delay_ms: default_success_delay_ms(),
            completion_delay_ms: default_completion_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Versioned name of the progress snapshot (`<data_dir>/<save_key>.json`)
    #[serde(default = "default_save_key")]
    pub save_key: String,
    /// Optional JSON catalog override; a missing file falls back to the built-in catalog.
    #[serde(default = "default_catalog_file", skip_serializing_if = "Option::is_none")]
    pub catalog_file: Option<String>,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_save_key() -> String {
    DEFAULT_SAVE_KEY.to_string()
}

fn default_catalog_file() -> Option<String> {
    Some("data/seeds/catalog.json".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            save_key: default_save_key(),
            catalog_file: default_catalog_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintConfig {
    /// Enable/disable the oracle
    #[serde(default = "default_hint_enabled")]
    pub enabled: bool,
    /// Gemini API key; `API_KEY` in the environment overrides it
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_hint_model")]
    pub model: String,
    /// Base URL of the generative language REST API
    #[serde(default = "default_hint_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_hint_timeout")]
    pub timeout_seconds: u32,
}

fn default_hint_enabled() -> bool {
    true
}

fn default_hint_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_hint_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_hint_timeout() -> u32 {
    10
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            enabled: default_hint_enabled(),
            api_key: String::new(),
            model: default_hint_model(),
            endpoint: default_hint_endpoint(),
            timeout_seconds: default_hint_timeout(),
        }
    }
}

impl HintConfig {
    /// API key from the environment, else from the file. Empty means unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| Some(self.api_key.clone()).filter(|k| !k.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hunt: HuntConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub hint: HintConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}
