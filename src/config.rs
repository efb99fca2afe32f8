//! Configuration Management
//!
//! Handles persistent client configuration for azrm.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Azure public cloud resource manager endpoint
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com/";

pub const DEFAULT_RECOVERY_SERVICES_API_VERSION: &str = "2024-04-01";
pub const DEFAULT_MACHINE_LEARNING_API_VERSION: &str = "2023-04-01";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Resource manager endpoint (sovereign clouds, test servers)
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// `api-version` for `Microsoft.RecoveryServices` requests
    #[serde(default)]
    pub recovery_services_api_version: Option<String>,
    /// `api-version` for `Microsoft.MachineLearningServices` requests
    #[serde(default)]
    pub machine_learning_api_version: Option<String>,
}

impl ClientConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azrm").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(&content).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse configuration from its JSON form
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse configuration")
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {:?}", path))?;

        Ok(())
    }

    /// Get effective endpoint (explicit > config > public cloud)
    pub fn effective_endpoint(&self, explicit: Option<&str>) -> Result<Url> {
        let endpoint = explicit
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT);

        let url = Url::parse(endpoint)
            .with_context(|| format!("Invalid resource manager endpoint: {}", endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Unsupported endpoint scheme: {}", url.scheme());
        }
        Ok(url)
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("azrm/{}", env!("CARGO_PKG_VERSION")))
    }

    pub fn recovery_services_api_version(&self) -> &str {
        self.recovery_services_api_version
            .as_deref()
            .unwrap_or(DEFAULT_RECOVERY_SERVICES_API_VERSION)
    }

    pub fn machine_learning_api_version(&self) -> &str {
        self.machine_learning_api_version
            .as_deref()
            .unwrap_or(DEFAULT_MACHINE_LEARNING_API_VERSION)
    }
}
