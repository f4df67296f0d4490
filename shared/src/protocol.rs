//! Frame events and render state passed from the simulation to its collaborators.

use serde::{Deserialize, Serialize};
use crate::ElementTag;

/// Simulation tick rate in Hz
pub const TICK_RATE: u32 = 60;

/// Arena width; projectiles outside `[0, ARENA_WIDTH]` are culled
pub const ARENA_WIDTH: f32 = 800.0;

/// Arena height; projectiles outside `[0, ARENA_HEIGHT]` are culled
pub const ARENA_HEIGHT: f32 = 600.0;

// =============================================================================
// Frame Events
// =============================================================================

/// Visual effect tags understood by the particle system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTag {
    PhaseTransition,
    Damage,
    Explosion,
    Ability,
    /// Element trail behind a projectile; the tag is the element name
    Trail,
}

impl EffectTag {
    /// Tag string handed to the particle system
    pub fn as_str(&self, element: Option<ElementTag>) -> &'static str {
        match self {
            Self::PhaseTransition => "phaseTransition",
            Self::Damage => "damage",
            Self::Explosion => "explosion",
            Self::Ability => "ability",
            Self::Trail => element.map(|e| e.particle_tag()).unwrap_or("trail"),
        }
    }
}

/// Events produced while simulating a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fire-and-forget particle effect
    Effect {
        tag: EffectTag,
        x: f32,
        y: f32,
        scale: Option<f32>,
        element: Option<ElementTag>,
    },
    /// Boss health changed after a successful hit (ratio in [0, 1])
    BossHealth { ratio: f32 },
    /// Boss entered a new phase
    PhaseChanged { phase: u8, enraged: bool },
    /// Reward dropped by a defeated boss
    PowerupDrop { x: f32, y: f32 },
    /// Boss reached zero health
    BossDefeated { boss_type: String, element: ElementTag },
}

// =============================================================================
// Render State
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectRender {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileRender {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossRender {
    pub body: RectRender,
    pub health_bar_back: RectRender,
    pub health_bar_fill: RectRender,
    pub health_ratio: f32,
    pub phase: u8,
    pub enraged: bool,
    pub invulnerable: bool,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub level: u32,
    pub frame: u64,
    pub platforms: Vec<RectRender>,
    pub enemies: Vec<RectRender>,
    pub coins: Vec<RectRender>,
    pub powerups: Vec<RectRender>,
    pub boss: Option<BossRender>,
    pub projectiles: Vec<ProjectileRender>,
}

// =============================================================================
// Serialization helpers
// =============================================================================

impl RenderSnapshot {
    pub fn serialize(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}
