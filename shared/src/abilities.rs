//! Boss ability registry.
//!
//! Every ability starts from the same base stats; a small per-name table
//! scales them. Unknown names keep the base stats.

use serde::{Deserialize, Serialize};

/// Base damage of a boss ability
pub const BASE_ABILITY_DAMAGE: f32 = 20.0;

/// Base cooldown in frames
pub const BASE_ABILITY_COOLDOWN: u32 = 180;

/// Base active duration in frames
pub const BASE_ABILITY_DURATION: u32 = 60;

// =============================================================================
// Ability Types
// =============================================================================

/// Multipliers applied to the base ability stats
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityModifier {
    pub damage: f32,
    pub cooldown: f32,
    pub duration: f32,
}

impl AbilityModifier {
    pub const NEUTRAL: AbilityModifier = AbilityModifier {
        damage: 1.0,
        cooldown: 1.0,
        duration: 1.0,
    };
}

/// Resolved ability stats, cached by the boss at construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityStats {
    pub damage: f32,
    /// Cooldown in frames
    pub cooldown: u32,
    /// Active duration in frames
    pub duration: u32,
}

// =============================================================================
// Modifier Table
// =============================================================================

static ABILITY_MODIFIERS: &[(&str, AbilityModifier)] = &[
    (
        "Rebirth Flames",
        AbilityModifier { damage: 1.5, cooldown: 2.0, duration: 1.5 },
    ),
    (
        "Fire Storm",
        AbilityModifier { damage: 1.2, cooldown: 0.8, duration: 2.0 },
    ),
    (
        "Wing Blast",
        AbilityModifier { damage: 0.8, cooldown: 0.5, duration: 0.5 },
    ),
];

/// Multiplier for an ability name, neutral if the name is not listed
pub fn ability_modifier(name: &str) -> AbilityModifier {
    ABILITY_MODIFIERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, m)| *m)
        .unwrap_or(AbilityModifier::NEUTRAL)
}

/// Resolve the stats of an ability by name. Never fails.
pub fn resolve_ability(name: &str) -> AbilityStats {
    let modifier = ability_modifier(name);
    AbilityStats {
        damage: BASE_ABILITY_DAMAGE * modifier.damage,
        cooldown: (BASE_ABILITY_COOLDOWN as f32 * modifier.cooldown).round() as u32,
        duration: (BASE_ABILITY_DURATION as f32 * modifier.duration).round() as u32,
    }
}
