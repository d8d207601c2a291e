//! Configuration loading for the cropdeck dashboard.
//!
//! Read once at startup and never mutated afterwards. Every field has a
//! built-in default so the dashboard runs without a config file.

use cropdeck_core::ROWS_PER_PAGE_OPTIONS;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

const CONFIG_ENV: &str = "CROPDECK_CONFIG";
const API_URL_ENV: &str = "CROPDECK_API_URL";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub refresh_interval_ms: u64,
    pub persistence_path: PathBuf,
    pub log_path: PathBuf,
    pub default_rows_per_page: usize,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "greenhouse".to_string(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval_ms: 250,
            persistence_path: PathBuf::from(".cropdeck/state.json"),
            log_path: PathBuf::from(".cropdeck/cropdeck.log"),
            default_rows_per_page: 10,
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl DashboardConfig {
    /// Resolve the config from `--config`, `CROPDECK_CONFIG` or defaults, then
    /// apply the `CROPDECK_API_URL` override.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let mut config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: DashboardConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "persistence_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if !ROWS_PER_PAGE_OPTIONS.contains(&self.default_rows_per_page) {
            return Err(ConfigError::InvalidValue {
                field: "default_rows_per_page",
                reason: format!("must be one of {:?}", ROWS_PER_PAGE_OPTIONS),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "greenhouse" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'greenhouse' is supported".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV).ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"https://farm.example/api/v1\"").unwrap();
        writeln!(file, "default_rows_per_page = 25").unwrap();
        let config = DashboardConfig::from_path(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://farm.example/api/v1");
        assert_eq!(config.default_rows_per_page, 25);
        assert_eq!(config.refresh_interval_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "grpc_endpoint = \"x\"").unwrap();
        assert!(matches!(
            DashboardConfig::from_path(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rows_per_page_must_be_an_option() {
        let config = DashboardConfig {
            default_rows_per_page: 12,
            ..DashboardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "default_rows_per_page", .. })
        ));
    }

    #[test]
    fn test_base_url_scheme_checked() {
        let config = DashboardConfig {
            api_base_url: "localhost:8000".to_string(),
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_theme_name_checked() {
        let config = DashboardConfig {
            theme: ThemeConfig {
                name: "synthwave".to_string(),
            },
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
