//! Runtime configuration.
//!
//! Everything is read from environment variables with defaults under the
//! user's data directory.

use std::env;
use std::path::PathBuf;

use anyhow::Result;

pub const DATA_DIR_VAR: &str = "IDEASPARK_DATA_DIR";
pub const EXPORT_DIR_VAR: &str = "IDEASPARK_EXPORT_DIR";
pub const LOG_LEVEL_VAR: &str = "IDEASPARK_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the saved collections
    pub data_dir: PathBuf,
    /// Where exports are written
    pub export_dir: PathBuf,
    /// Log filter (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("ideaspark"))
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?,
        };

        let export_dir = lookup(EXPORT_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| data_dir.join("exports"));

        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            data_dir,
            export_dir,
            log_level,
        })
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("ideaspark.log")
    }
}
