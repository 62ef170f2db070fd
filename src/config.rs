//! Configuration for skill-directory

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Default storage directory
pub fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skill-directory")
}

/// Which store implementation backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Lock-guarded maps, lost on exit
    Memory,
    /// Embedded sled single table
    #[default]
    Sled,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Sled => f.write_str("sled"),
        }
    }
}

impl FromStr for Backend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sled" => Ok(Self::Sled),
            other => Err(StorageError::Config(format!("unknown backend '{other}'"))),
        }
    }
}

/// Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for on-disk data
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    #[serde(default)]
    pub backend: Backend,

    /// sled page cache size
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity_bytes: u64,

    /// sled background flush interval in milliseconds (0 = disabled)
    #[serde(default = "default_flush_every_ms")]
    pub flush_every_ms: u64,

    /// Rewrite denormalized AccountSkill copies after a catalog edit
    #[serde(default)]
    pub resync_on_catalog_update: bool,
}

fn default_cache_capacity() -> u64 {
    64 * 1024 * 1024
}

fn default_flush_every_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            backend: Backend::default(),
            cache_capacity_bytes: default_cache_capacity(),
            flush_every_ms: default_flush_every_ms(),
            resync_on_catalog_update: false,
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| StorageError::Config(e.to_string()))
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StorageError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| StorageError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Flush interval as sled expects it
    pub fn flush_interval(&self) -> Option<u64> {
        (self.flush_every_ms > 0).then_some(self.flush_every_ms)
    }

    /// sled database directory
    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join("directory.sled")
    }

    /// Get config file path
    pub fn config_path(&self) -> PathBuf {
        self.storage_dir.join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!("Memory".parse::<Backend>().unwrap(), Backend::Memory);
        assert_eq!("sled".parse::<Backend>().unwrap(), Backend::Sled);
        assert!("dynamo".parse::<Backend>().is_err());
    }

    #[test]
    fn test_paths_derive_from_storage_dir() {
        let config = Config {
            storage_dir: PathBuf::from("/var/lib/skills"),
            ..Default::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/skills/directory.sled"));
        assert_eq!(config.config_path(), PathBuf::from("/var/lib/skills/config.toml"));
    }
}
