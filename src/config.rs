use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Default debounce delay between the last keystroke and the query.
pub const DEFAULT_INPUT_DELAY_MS: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cap on merged results; `None` keeps every result.
    pub max_results: Option<usize>,
    /// Height of the visible result window; presentation only.
    pub max_viewable_results: Option<usize>,
    /// Debounce delay in milliseconds.
    pub input_delay_ms: i64,
    #[serde(default)]
    pub quicklinks: Vec<QuicklinkConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuicklinkConfig {
    pub name: String,
    pub url: String,
}

impl QuicklinkConfig {
    pub fn has_query_placeholder(&self) -> bool {
        self.url.contains("{query}")
    }

    pub fn resolve_url(&self, query: &str) -> String {
        self.url.replace("{query}", &urlencoding::encode(query))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_results: None,
            max_viewable_results: None,
            input_delay_ms: DEFAULT_INPUT_DELAY_MS,
            quicklinks: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("omnibar")
            .join("config.toml")
    }

    /// Load settings from the default path, or defaults if there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate settings from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the widget cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_delay_ms < 0 {
            return Err(ConfigError::NegativeDelay(self.input_delay_ms));
        }
        if self.max_results == Some(0) {
            return Err(ConfigError::ZeroMaxResults);
        }
        if self.max_viewable_results == Some(0) {
            return Err(ConfigError::ZeroViewableResults);
        }
        if let Some(link) = self.quicklinks.iter().find(|l| !l.has_query_placeholder()) {
            return Err(ConfigError::QuicklinkTemplate(link.url.clone()));
        }
        Ok(())
    }

    /// The debounce delay. Only meaningful after [`Settings::validate`].
    pub fn input_delay(&self) -> Duration {
        Duration::from_millis(self.input_delay_ms.max(0) as u64)
    }

    /// Save settings to a TOML file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Write(format!("create {}: {}", parent.display(), e)))?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Write(e.to_string()))?;

        fs::write(path, content).map_err(|e| ConfigError::Write(e.to_string()))?;

        Ok(())
    }
}
