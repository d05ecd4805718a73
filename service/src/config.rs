//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use vouch_types::VerificationParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Configuration for the verification service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so
/// an empty file is a valid config.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Data directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Base URL verification links are minted under.
    #[serde(default = "default_link_base_url")]
    pub link_base_url: String,

    /// Attestation count at which a new video's consensus flips.
    #[serde(default = "default_threshold")]
    pub default_threshold: u32,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./vouch_data")
}

fn default_map_size() -> usize {
    1024 * 1024 * 1024
}

fn default_link_base_url() -> String {
    "https://vouch.app".to_string()
}

fn default_threshold() -> u32 {
    3
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config must deserialize via field defaults")
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Engine parameters derived from this config.
    pub fn params(&self) -> VerificationParams {
        VerificationParams {
            default_threshold: self.default_threshold,
            link_base_url: self.link_base_url.clone(),
            ..VerificationParams::standard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.default_threshold, 3);
        assert_eq!(config.link_base_url, "https://vouch.app");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: ServiceConfig = toml::from_str(
            r#"
            default_threshold = 5
            link_base_url = "https://staging.vouch.app"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_threshold, 5);
        assert_eq!(config.link_base_url, "https://staging.vouch.app");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn from_toml_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("vouch.toml");
        std::fs::write(&path, "default_threshold = 7\nlog_format = \"json\"\n").unwrap();

        let config = ServiceConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.default_threshold, 7);
        assert_eq!(config.log_format, "json");
        assert_eq!(config.params().default_threshold, 7);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServiceConfig::from_toml_file(Path::new("/nonexistent/vouch.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
