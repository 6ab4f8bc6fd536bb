//! Application configuration: where donor data and letters live, and how
//! output is styled.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{errors::MailroomError, storage::json_backend::write_atomic};

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the platform data directory for `donors.json`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Overrides where per-donor letter files are written.
    #[serde(default)]
    pub letters_dir: Option<PathBuf>,
    /// Disables colored output.
    #[serde(default)]
    pub plain_mode: bool,
}

impl Config {
    pub fn letters_dir_or(&self, data_root: &Path) -> PathBuf {
        self.letters_dir
            .clone()
            .unwrap_or_else(|| data_root.join("letters"))
    }
}

/// Loads and saves the app configuration from the platform config directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, MailroomError> {
        let base = crate::storage::json_backend::env_home().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mailroom")
        });
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, MailroomError> {
        fs::create_dir_all(&base).map_err(|source| MailroomError::PersistenceDenied {
            path: base.clone(),
            source,
        })?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    /// Missing config file yields defaults; a malformed one is corrupt.
    pub fn load(&self) -> Result<Config, MailroomError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(MailroomError::PersistenceDenied {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| MailroomError::PersistenceCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, config: &Config) -> Result<(), MailroomError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert!(config.data_dir.is_none());
        assert!(!config.plain_mode);
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/mailroom-data")),
            letters_dir: None,
            plain_mode: true,
        };
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert!(loaded.plain_mode);
    }

    #[test]
    fn malformed_file_is_corrupt() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "{ not json").unwrap();
        let err = manager.load().unwrap_err();
        assert!(matches!(err, MailroomError::PersistenceCorrupt { .. }));
    }
}
