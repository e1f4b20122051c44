//! Configuration management for thumbduel.
//!
//! Configuration is loaded from a platform config directory with sensible
//! defaults; a missing file is not an error.

use crate::error::ConfigError;
use crate::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis service settings
    pub gemini: GeminiConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Analysis service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Model identifier sent with every request
    pub model: String,

    /// API base URL
    pub endpoint: String,

    /// Operator override API key. Takes priority over GEMINI_API_KEY;
    /// empty means unset.
    pub api_key: String,

    /// Deadline for one analysis call in milliseconds
    pub timeout_ms: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_ms: 45_000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.thumbduel.thumbduel/config.toml
    /// - Linux: ~/.config/thumbduel/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\thumbduel\config\config.toml
    ///
    /// Falls back to ~/.thumbduel/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "thumbduel", "thumbduel")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".thumbduel").join("config.toml")
            })
    }

    /// The operator override key, if set to a non-empty value.
    pub fn api_key_override(&self) -> Option<String> {
        let trimmed = self.gemini.api_key.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.model must not be empty".to_string(),
            ));
        }
        if self.gemini.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.endpoint must not be empty".to_string(),
            ));
        }
        if self.gemini.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "gemini.timeout_ms must be greater than zero".to_string(),
            ));
        }
        let level = self.logging.level.as_str();
        if !["error", "warn", "info", "debug", "trace"].contains(&level) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of error/warn/info/debug/trace, got '{level}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.timeout_ms, 45_000);
        assert!(config.api_key_override().is_none());
    }

    #[test]
    fn test_config_to_toml() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[gemini]"));
        assert!(toml.contains("[logging]"));
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[gemini]\napi_key = \"operator-key\"\ntimeout_ms = 10000\n"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.api_key_override().as_deref(), Some("operator-key"));
        assert_eq!(config.gemini.timeout_ms, 10_000);
        // Unspecified fields fall back to defaults
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_blank_api_key_is_no_override() {
        let config = Config {
            gemini: GeminiConfig {
                api_key: "   ".to_string(),
                ..GeminiConfig::default()
            },
            ..Config::default()
        };
        assert!(config.api_key_override().is_none());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[gemini]\ntimeout_ms = 0\n").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }
}
