//! Configuration module
//!
//! ```toml
//! [server]
//! url = "http://localhost:8080/custom/trilium-client"
//! token = "123"
//! timeout_secs = 30
//!
//! [search]
//! default_limit = 20
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::remote::ClientContext;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Where the scripting endpoint lives and how to authenticate
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServerConfig {
    /// Endpoint URL
    #[serde(default)]
    pub url: Option<String>,

    /// Token checked by the endpoint script
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds; unset waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    20
}

const LOCAL_DIR: &str = ".trilium";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Load config from default locations
    pub fn load() -> Result<Self> {
        // Try local config first, then global
        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Find local .trilium/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_config_above(&current)
    }

    fn find_config_above(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let config_path = current.join(LOCAL_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Platform config path (e.g. ~/.config/trilium-remote/config.toml)
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "trilium-remote").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Apply explicit overrides (CLI flags, env vars) on top of file values
    pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
        if url.is_some() {
            self.server.url = url;
        }
        if token.is_some() {
            self.server.token = token;
        }
        self
    }

    /// Session context for the dispatch channel
    pub fn context(&self) -> Result<ClientContext> {
        let url = self.server.url.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Server URL not configured. Set server.url in config or use --url / TRILIUM_URL."
            )
        })?;
        let token = self.server.token.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Server token not configured. Set server.token in config or use --token / TRILIUM_TOKEN."
            )
        })?;

        let mut context = ClientContext::new(url.as_str(), token.as_str());
        if let Some(secs) = self.server.timeout_secs {
            context = context.with_timeout(secs);
        }
        Ok(context)
    }
}
