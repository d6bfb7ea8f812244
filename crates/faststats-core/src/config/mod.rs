//! Persisted SDK configuration backed by a JSON file.
//!
//! The file is created exactly once, with exclusive-create semantics, the first
//! time a facade is constructed. Later loads only read it; a missing field falls
//! back to its default without rewriting the file.

pub mod defaults;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::errors::ConfigError;

/// `{"serverId": "<uuid>", "enabled": bool, "debug": bool}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    /// Anonymous identity of this server, sent as `server_id`.
    #[serde(default = "defaults::default_server_id")]
    pub server_id: Uuid,
    /// Whether the submitter may start at all.
    #[serde(default = "defaults::default_enabled")]
    pub enabled: bool,
    /// Turns on diagnostic logging, OR-ed with the builder's debug flag.
    #[serde(default = "defaults::default_debug")]
    pub debug: bool,
}

impl MetricsConfig {
    pub fn new(server_id: Uuid, enabled: bool, debug: bool) -> Self {
        Self {
            server_id,
            enabled,
            debug,
        }
    }

    /// A config with a fresh server id and default flags.
    pub fn fresh() -> Self {
        Self::new(
            defaults::default_server_id(),
            defaults::DEFAULT_ENABLED,
            defaults::DEFAULT_DEBUG,
        )
    }

    /// Load the config at `path`, creating it with fresh defaults if absent.
    ///
    /// An existing regular file is parsed and never written back. A missing
    /// file is created together with its parent directory; if another writer
    /// wins the race, `ConfigError::AlreadyExists` is returned instead of
    /// overwriting its server id.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.is_file() {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            return Self::parse(&text, path);
        }

        let config = Self::fresh();
        config.create(path)?;
        Ok(config)
    }

    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, Path::new("<string>"))
    }

    fn parse(json: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn create(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Serialize {
            path: path.display().to_string(),
            source,
        })?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(ConfigError::AlreadyExists {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(io_err(e)),
        };
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::fresh()
    }
}

/// `<plugins_root>/faststats/config.json`
pub fn config_path(plugins_root: impl AsRef<Path>) -> PathBuf {
    plugins_root
        .as_ref()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_loses_to_a_concurrent_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faststats").join("config.json");

        // Another process creates the file after `load` saw it missing.
        let winner = MetricsConfig::fresh();
        winner.create(&path).unwrap();

        let err = MetricsConfig::fresh().create(&path).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }), "{err:?}");

        let on_disk = MetricsConfig::load(&path).unwrap();
        assert_eq!(on_disk, winner);
    }

    #[test]
    fn created_file_is_pretty_camel_case_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = MetricsConfig::new(Uuid::nil(), true, false);
        config.create(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"serverId\": \"00000000-0000-0000-0000-000000000000\""));
        assert!(text.contains("\"enabled\": true"));
        assert!(text.contains("\"debug\": false"));
    }
}
