//! Engine configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "ASCENT_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulation frames per second
    pub tick_rate: u32,
    pub start_level: u32,
    /// Stop the headless run after this many frames
    pub max_frames: u64,
    pub progress_path: PathBuf,
    pub log_filter: String,
    pub save_interval_secs: u64,
    /// Seed for level generation; random when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: ascent_shared::TICK_RATE,
            start_level: 1,
            max_frames: 36_000,
            progress_path: PathBuf::from("progress.json"),
            log_filter: "info".to_string(),
            save_interval_secs: 10,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Read the file named by `ASCENT_CONFIG`, or fall back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Clamp values the loop cannot run with
    fn sanitized(mut self) -> Self {
        self.tick_rate = self.tick_rate.max(1);
        self.start_level = self.start_level.max(1);
        self.save_interval_secs = self.save_interval_secs.max(1);
        self
    }
}
