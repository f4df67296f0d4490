//! Score, combo and run progression.

use log::info;
use serde::{Deserialize, Serialize};

/// Frames a combo survives without another score
pub const COMBO_WINDOW: u32 = 120;

/// Combo length per multiplier step
const COMBO_STEP: u32 = 10;
const MULTIPLIER_STEP: f64 = 0.5;

/// Score with a combo multiplier and a persistent high score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreManager {
    pub score: u64,
    pub high_score: u64,
    pub multiplier: f64,
    pub combo: u32,
    pub combo_timer: u32,
}

impl ScoreManager {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            multiplier: 1.0,
            combo: 0,
            combo_timer: 0,
        }
    }

    /// Add points at the current multiplier, then extend the combo.
    /// Returns true if this set a new high score.
    pub fn add_score(&mut self, points: u32) -> bool {
        self.score += (points as f64 * self.multiplier).floor() as u64;
        self.combo += 1;
        self.combo_timer = COMBO_WINDOW;
        self.multiplier = 1.0 + (self.combo / COMBO_STEP) as f64 * MULTIPLIER_STEP;

        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    /// Advance one frame; the combo resets once its timer runs out
    pub fn update(&mut self) {
        if self.combo_timer > 0 {
            self.combo_timer -= 1;
            if self.combo_timer == 0 {
                self.combo = 0;
                self.multiplier = 1.0;
            }
        }
    }
}

impl Default for ScoreManager {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Player stats carried between levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub health: f32,
    pub max_health: f32,
    pub coins: u32,
    pub lives: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            max_health: 100.0,
            coins: 0,
            lives: 3,
        }
    }
}

impl PlayerStats {
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
    }

    /// Returns true if this hit cost a life
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount.max(0.0)).max(0.0);
        if self.health > 0.0 {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.health = self.max_health;
        true
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

/// What survives between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub high_score: u64,
    pub unlocked_levels: u32,
    pub player_stats: PlayerStats,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            high_score: 0,
            unlocked_levels: 1,
            player_stats: PlayerStats::default(),
        }
    }
}

/// State of the current run
#[derive(Debug, Clone)]
pub struct GameProgress {
    pub current_level: u32,
    pub player_stats: PlayerStats,
    pub unlocked_levels: u32,
    pub score: ScoreManager,
}

impl GameProgress {
    pub fn new(start_level: u32) -> Self {
        Self::from_record(start_level, ProgressRecord::default())
    }

    pub fn from_record(start_level: u32, record: ProgressRecord) -> Self {
        Self {
            current_level: start_level,
            player_stats: record.player_stats,
            unlocked_levels: record.unlocked_levels.max(1),
            score: ScoreManager::new(record.high_score),
        }
    }

    /// Record a newly reachable level. Returns false if it was already unlocked.
    pub fn unlock_level(&mut self, level: u32) -> bool {
        if level <= self.unlocked_levels {
            return false;
        }
        self.unlocked_levels = level;
        info!("Unlocked level {}", level);
        true
    }

    pub fn record(&self) -> ProgressRecord {
        ProgressRecord {
            high_score: self.score.high_score,
            unlocked_levels: self.unlocked_levels,
            player_stats: self.player_stats.clone(),
        }
    }
}
