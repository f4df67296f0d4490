//! Generated level and boss descriptions.

use serde::{Deserialize, Serialize};
use crate::ElementTag;

// =============================================================================
// Boss Content
// =============================================================================

/// Boss stats. Scale linearly with the boss index, without a cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossStats {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
}

/// Declarative description of a boss encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSpec {
    pub boss_type: String,
    pub element: ElementTag,
    pub ability_names: Vec<String>,
    pub stats: BossStats,
}

// =============================================================================
// Level Content
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    Moving,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PlatformKind,
    /// Horizontal speed of a moving platform
    pub speed: f32,
    /// Travel distance of a moving platform
    pub distance: f32,
}

/// Enemy types, ordered from easiest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Bat,
    Skeleton,
    Ghost,
    Goblin,
    Wizard,
    Warrior,
    Archer,
    Mage,
    Assassin,
    Knight,
    Demon,
}

impl EnemyKind {
    pub const ORDER: [EnemyKind; 12] = [
        Self::Slime,
        Self::Bat,
        Self::Skeleton,
        Self::Ghost,
        Self::Goblin,
        Self::Wizard,
        Self::Warrior,
        Self::Archer,
        Self::Mage,
        Self::Assassin,
        Self::Knight,
        Self::Demon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Slime => "slime",
            Self::Bat => "bat",
            Self::Skeleton => "skeleton",
            Self::Ghost => "ghost",
            Self::Goblin => "goblin",
            Self::Wizard => "wizard",
            Self::Warrior => "warrior",
            Self::Archer => "archer",
            Self::Mage => "mage",
            Self::Assassin => "assassin",
            Self::Knight => "knight",
            Self::Demon => "demon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub x: f32,
    pub y: f32,
    pub kind: EnemyKind,
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSpec {
    pub x: f32,
    pub y: f32,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Health,
    Speed,
    Jump,
    Shield,
    Damage,
    Multishot,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 6] = [
        Self::Health,
        Self::Speed,
        Self::Jump,
        Self::Shield,
        Self::Damage,
        Self::Multishot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Speed => "speed",
            Self::Jump => "jump",
            Self::Shield => "shield",
            Self::Damage => "damage",
            Self::Multishot => "multishot",
        }
    }

    /// Render color. Jump has no dedicated color and draws white.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Health => "#ff0000",
            Self::Speed => "#00ff00",
            Self::Damage => "#ff6600",
            Self::Shield => "#0099ff",
            Self::Multishot => "#ff00ff",
            Self::Jump => crate::DEFAULT_ELEMENT_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupSpec {
    pub x: f32,
    pub y: f32,
    pub kind: PowerupKind,
    pub duration_ms: u32,
}

/// Everything needed to populate one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub level: u32,
    pub difficulty: u32,
    pub platforms: Vec<PlatformSpec>,
    pub enemies: Vec<EnemySpec>,
    pub coins: Vec<CoinSpec>,
    pub powerups: Vec<PowerupSpec>,
    pub boss: Option<BossSpec>,
    pub background: String,
    pub music: String,
}

impl LevelSpec {
    pub fn is_boss_level(&self) -> bool {
        self.boss.is_some()
    }
}
