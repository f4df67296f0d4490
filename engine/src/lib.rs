//! Boss encounter engine for a 2D platformer.
//!
//! Content is generated per level number, then the `LevelManager` runs the
//! live entities frame by frame and reports to its collaborators.

pub mod boss;
pub mod collaborators;
pub mod collision;
pub mod config;
pub mod error;
pub mod generator;
pub mod level;
pub mod persistence;
pub mod progress;
pub mod timers;

pub use boss::{Boss, PatternKind, Projectile};
pub use collaborators::{Collaborators, Effects, Hud, LogCollaborators, Progression};
pub use config::EngineConfig;
pub use error::{ConfigError, ContentError, PersistenceError};
pub use generator::{generate_boss_spec, generate_level_spec, LevelCatalogue, LEVEL_COUNT};
pub use level::{FrameReport, LevelManager, PlayerView};
pub use progress::{GameProgress, ProgressRecord, ScoreManager};
pub use timers::{Clock, ManualClock, SharedClock, SystemClock, TaskScheduler};
