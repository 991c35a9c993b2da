// ABOUTME: Panel configuration loaded from a TOML file in the user's config directory
// Missing files are created with defaults so first launch works without setup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every API path is joined onto, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when set.
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Offset from UTC used by the header clock. Defaults to India Standard Time.
    pub utc_offset_minutes: i32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 330,
        }
    }
}

/// Optional panel surfaces. A disabled surface is skipped when key bindings
/// are set up; the panel still starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct PanelElements {
    pub send_notification: bool,
    pub mark_all_read: bool,
    pub clear_all: bool,
    pub compose_form: bool,
    pub status_filter: bool,
    pub type_filter: bool,
    pub recipient_type: bool,
    pub clock: bool,
}

impl Default for PanelElements {
    fn default() -> Self {
        Self {
            send_notification: true,
            mark_all_read: true,
            clear_all: true,
            compose_form: true,
            status_filter: true,
            type_filter: true,
            recipient_type: true,
            clock: true,
        }
    }
}

impl PanelElements {
    /// Every optional surface paired with its display name.
    pub fn entries(&self) -> [(&'static str, bool); 8] {
        [
            ("send notification", self.send_notification),
            ("mark all read", self.mark_all_read),
            ("clear all", self.clear_all),
            ("compose form", self.compose_form),
            ("status filter", self.status_filter),
            ("type filter", self.type_filter),
            ("recipient type", self.recipient_type),
            ("clock", self.clock),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub elements: PanelElements,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub api: ApiConfig,
    pub clock: ClockConfig,
    pub ui: UiConfig,
}

impl PanelConfig {
    /// Loads the config from `path`, or from the default location when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {:?}, writing defaults", path);
            Self::default().save_to(path)?;
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("notify-panel").join("config.toml"))
}
