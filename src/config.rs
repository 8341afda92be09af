//! Configuration management for docscope.
//!
//! Configuration is read from the first file found among:
//! 1. an explicit `--config` path
//! 2. `./docscope.{toml,yaml,yml,json}`
//! 3. `<config dir>/docscope/config.{toml,yaml,yml,json}`
//!
//! Environment variables override file values; missing sections fall back to
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Default analysis service endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Light or dark output palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Connection settings for the analysis service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the analysis service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds. Unset means the HTTP client default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// User agent override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout: None,
            user_agent: None,
        }
    }
}

impl ServiceConfig {
    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `DOCSCOPE_ENDPOINT`: service base URL
    /// - `DOCSCOPE_REQUEST_TIMEOUT`: timeout in seconds
    /// - `DOCSCOPE_USER_AGENT`: user agent string
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("DOCSCOPE_ENDPOINT") {
            if !val.trim().is_empty() {
                self.endpoint = val;
            }
        }
        if let Ok(val) = std::env::var("DOCSCOPE_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.request_timeout = Some(secs);
            }
        }
        if let Ok(val) = std::env::var("DOCSCOPE_USER_AGENT") {
            self.user_agent = Some(val);
        }
        self
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }
}

/// Presentation settings passed down to the results presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    /// Emit ANSI colours.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Show the character count of text submissions.
    #[serde(default = "default_true")]
    pub show_character_count: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            color: true,
            show_character_count: true,
        }
    }
}

impl DisplayConfig {
    /// Apply environment variable overrides.
    ///
    /// - `DOCSCOPE_THEME`: "light" or "dark"
    /// - `NO_COLOR`: any value disables colour
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(theme) = std::env::var("DOCSCOPE_THEME")
            .ok()
            .and_then(|v| ThemeMode::from_str(&v))
        {
            self.theme = theme;
        }
        if std::env::var_os("NO_COLOR").is_some() {
            self.color = false;
        }
        self
    }

    /// Switch between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path or by discovery, with
    /// environment overrides applied.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(),
        };

        let config = match path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::read_file(&path).await?
            }
            None => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        Ok(config.with_env_overrides())
    }

    /// Read a config file without environment overrides.
    /// The format is chosen by extension; unknown extensions parse as JSON.
    pub async fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let mut config: Config = match extension(path) {
            "toml" => toml::from_str(&contents).map_err(|e| parse_error("TOML", e))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents).map_err(|e| parse_error("YAML", e))?
            }
            _ => serde_json::from_str(&contents).map_err(|e| parse_error("JSON", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Write the config to `path`, choosing the format by extension.
    pub async fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = match extension(path) {
            "toml" => self.to_toml()?,
            "yaml" | "yml" => {
                serde_yaml::to_string(self).map_err(|e| serialize_error("YAML", e))?
            }
            _ => serde_json::to_string_pretty(self).map_err(|e| serialize_error("JSON", e))?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(path, contents)
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| serialize_error("TOML", e))
    }

    pub fn with_env_overrides(mut self) -> Self {
        self.service = self.service.with_env_overrides();
        self.display = self.display.with_env_overrides();
        self
    }

    /// Where a new config file is written when none exists yet.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("docscope").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("docscope.toml"))
    }
}

/// Look for a config file in the working directory, then the user config dir.
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = CONFIG_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("docscope.{}", ext)))
        .collect();

    if let Some(dir) = dirs::config_dir() {
        let app_dir = dir.join("docscope");
        candidates.extend(
            CONFIG_EXTENSIONS
                .iter()
                .map(|ext| app_dir.join(format!("config.{}", ext))),
        );
    }

    candidates.into_iter().find(|path| path.is_file())
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("json")
}

fn parse_error(format: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Parse {
        format,
        message: err.to_string(),
    }
}

fn serialize_error(format: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Serialize {
        format,
        message: err.to_string(),
    }
}
