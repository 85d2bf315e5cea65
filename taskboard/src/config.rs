//! Board configuration: backend URL and column titles.
//!
//! Values are resolved in order: built-in defaults, the YAML config file,
//! the `TASKBOARD_API_URL` environment variable, then explicit overrides.

use crate::error::{BoardError, Result};
use crate::types::{Board, ColumnId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Environment variable overriding the backend URL
pub const API_URL_ENV: &str = "TASKBOARD_API_URL";

const CONFIG_DIR_NAME: &str = "taskboard";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Optional per-column display titles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnTitles {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub todo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<String>,
}

impl ColumnTitles {
    /// Title for a column, falling back to the built-in one
    pub fn title(&self, id: ColumnId) -> String {
        let custom = match id {
            ColumnId::Todo => self.todo.as_deref(),
            ColumnId::Doing => self.doing.as_deref(),
            ColumnId::Done => self.done.as_deref(),
        };
        custom.unwrap_or_else(|| Board::default_title(id)).to_string()
    }
}

/// Persisted board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub api_url: String,
    pub columns: ColumnTitles,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            columns: ColumnTitles::default(),
        }
    }
}

impl BoardConfig {
    /// `$CONFIG_DIR/taskboard/config.yaml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(&content).map_err(|e| BoardError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolve the full configuration.
    ///
    /// `file` replaces the default config path; `api_url` beats the environment.
    pub fn resolve(file: Option<&Path>, api_url: Option<&str>) -> Result<Self> {
        let mut config = match file {
            Some(path) => {
                if !path.exists() {
                    return Err(BoardError::Config {
                        path: path.to_path_buf(),
                        message: "file does not exist".to_string(),
                    });
                }
                Self::load_from(path)?
            }
            None => match Self::default_path() {
                Some(path) => Self::load_from(&path)?,
                None => Self::default(),
            },
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        if let Some(url) = api_url {
            config.api_url = url.to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the backend URL is usable
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| BoardError::invalid_value("api_url", e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(BoardError::invalid_value(
                "api_url",
                format!("unsupported scheme '{}'", other),
            )),
        }
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml_ng::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
