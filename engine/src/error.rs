//! Error types for content loading, persistence and configuration.

use thiserror::Error;

/// Problems with generated or hand-written encounter content
#[derive(Error, Debug)]
pub enum ContentError {
    /// Level number outside the generated catalogue
    #[error("level {level} is out of range (valid levels are 1..={max})")]
    LevelOutOfRange { level: u32, max: u32 },

    /// Boss requested for a level that does not carry one
    #[error("level {0} is not a boss level")]
    NotABossLevel(u32),

    /// A phase has no attack patterns to cycle through
    #[error("no attack patterns configured for phase {phase}")]
    MissingPatterns { phase: usize },

    /// Boss stats that would break the health ratio
    #[error("boss health must be positive, got {0}")]
    InvalidHealth(f32),
}

/// Failures while reading or writing saved progress
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("progress file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("progress file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("persistence task is not running")]
    Closed,
}

/// Failures while loading the engine configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
