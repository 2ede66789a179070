//! MathPulse configuration
//!
//! Config file: ~/.config/mathpulse/config.toml or /etc/mathpulse/config.toml

use crate::llm_client::InferenceConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "MATHPULSE_CONFIG";

/// Environment variable that overrides the inference API token
pub const TOKEN_ENV: &str = "HUGGINGFACE_API_TOKEN";

/// Tutor chat settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// How many recent history messages are sent to the model
    pub history_window: usize,
    /// Model replies shorter than this (trimmed) use the fallback engine
    pub min_reply_chars: usize,
    pub max_tokens: u32,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            history_window: 5,
            min_reply_chars: 10,
            max_tokens: 300,
        }
    }
}

/// HTTP daemon settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MathPulseConfig {
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub tutor: TutorConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl MathPulseConfig {
    /// Default user config path: ~/.config/mathpulse/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mathpulse").join("config.toml"))
    }

    /// System config path: /etc/mathpulse/config.toml
    pub fn system_config_path() -> PathBuf {
        PathBuf::from("/etc/mathpulse/config.toml")
    }

    /// Load configuration
    ///
    /// Priority:
    /// 1. Explicit path (command line)
    /// 2. $MATHPULSE_CONFIG
    /// 3. User config (~/.config/mathpulse/config.toml)
    /// 4. System config (/etc/mathpulse/config.toml)
    /// 5. Defaults
    ///
    /// $HUGGINGFACE_API_TOKEN overrides the token in every case.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::discover(explicit) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            config.apply_token(&token);
        }

        Ok(config)
    }

    fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                return Some(user_path);
            }
        }

        let system_path = Self::system_config_path();
        if system_path.exists() {
            return Some(system_path);
        }

        None
    }

    /// Read and parse one TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: MathPulseConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Use `token` for the inference API; blank tokens are ignored
    pub fn apply_token(&mut self, token: &str) {
        let token = token.trim();
        if !token.is_empty() {
            self.inference.api_token = Some(token.to_string());
        }
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
