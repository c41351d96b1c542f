// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::errors::AssistantError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub webhook: WebhookConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote responder settings. With no URL configured the assistant
/// runs purely on the local intent engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { port: 7878 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulate a natural typing pace before showing bot replies.
    pub typing_delay: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { typing_delay: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Persist chat history, context, and analytics to disk. Always
    /// best-effort: the assistant runs fine from a cold start.
    pub persist: bool,
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist: true,
            data_dir: None,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults if no
    /// config file exists.
    pub fn load() -> Result<Self, AssistantError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AssistantError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| AssistantError::Config(format!("{}: {e}", path.display())))
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pageturner").join("config.toml"))
    }

    /// Directory for persisted chat state (history, context, logs).
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("pageturner")))
    }
}
