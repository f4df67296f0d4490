//! Level and boss content generator.
//!
//! Every third level carries a boss. The boss index picks the element and
//! variant and drives stat scaling; the level number drives entity counts.
//! Placement is random, drawn from the `Rng` the caller passes in so a seeded
//! generator reproduces the same content.

use log::info;
use rand::Rng;

use ascent_shared::{
    boss_type_def, BossSpec, BossStats, CoinSpec, ElementTag, EnemyKind, EnemySpec,
    LevelSpec, PlatformKind, PlatformSpec, PowerupKind, PowerupSpec,
};

use crate::error::ContentError;

/// Number of levels in the generated catalogue
pub const LEVEL_COUNT: u32 = 90;

/// Horizontal extent used for entity placement
const PLACEMENT_WIDTH: f32 = 700.0;

/// Vertical extent used for enemy, coin and powerup placement
const PLACEMENT_HEIGHT: f32 = 400.0;

/// Platforms are placed between these heights
const PLATFORM_MIN_Y: f32 = 100.0;
const PLATFORM_HEIGHT: f32 = 20.0;

/// Powerup effect duration in milliseconds
const POWERUP_DURATION_MS: u32 = 10_000;

/// True for levels that end with a boss encounter
pub fn is_boss_level(level: u32) -> bool {
    level > 0 && level % 3 == 0
}

/// Difficulty tier: one step every ten levels
pub fn difficulty(level: u32) -> u32 {
    level.div_ceil(10)
}

/// Zero-based boss ordinal for a boss level
pub fn boss_index(level: u32) -> u32 {
    level / 3 - 1
}

// =============================================================================
// Boss Generation
// =============================================================================

/// Derive the boss of a boss level.
///
/// Stats grow linearly with the boss index and are intentionally uncapped,
/// so this accepts boss levels past the end of the catalogue.
pub fn generate_boss_spec(level: u32) -> Result<BossSpec, ContentError> {
    if level == 0 {
        return Err(ContentError::LevelOutOfRange { level, max: LEVEL_COUNT });
    }
    if !is_boss_level(level) {
        return Err(ContentError::NotABossLevel(level));
    }

    let index = boss_index(level);
    let element = ElementTag::ORDER[index as usize % ElementTag::ORDER.len()];
    let variant = boss_type_def(element, index as usize / ElementTag::ORDER.len());

    Ok(BossSpec {
        boss_type: variant.name.to_string(),
        element,
        ability_names: variant.abilities.iter().map(|a| a.to_string()).collect(),
        stats: BossStats {
            health: 100.0 + 50.0 * index as f32,
            damage: 10.0 + 2.0 * index as f32,
            speed: 2.0 + 0.1 * index as f32,
        },
    })
}

// =============================================================================
// Level Generation
// =============================================================================

/// Generate a full level description
pub fn generate_level_spec<R: Rng + ?Sized>(
    level: u32,
    rng: &mut R,
) -> Result<LevelSpec, ContentError> {
    if level == 0 || level > LEVEL_COUNT {
        return Err(ContentError::LevelOutOfRange { level, max: LEVEL_COUNT });
    }

    let difficulty = difficulty(level);
    let boss = if is_boss_level(level) {
        Some(generate_boss_spec(level)?)
    } else {
        None
    };
    let music_kind = if boss.is_some() { "boss" } else { "level" };

    Ok(LevelSpec {
        level,
        difficulty,
        platforms: generate_platforms(difficulty, rng),
        enemies: generate_enemies(difficulty, rng),
        coins: generate_coins(difficulty, rng),
        powerups: generate_powerups(level, rng),
        boss,
        background: format!("background_{}", difficulty),
        music: format!("music_{}_{}", music_kind, difficulty),
    })
}

fn generate_platforms<R: Rng + ?Sized>(difficulty: u32, rng: &mut R) -> Vec<PlatformSpec> {
    let count = 10 + 2 * difficulty;
    (0..count)
        .map(|_| PlatformSpec {
            x: rng.gen_range(0.0..PLACEMENT_WIDTH),
            y: PLATFORM_MIN_Y + rng.gen_range(0.0..PLACEMENT_HEIGHT),
            width: 50.0 + rng.gen_range(0.0..100.0),
            height: PLATFORM_HEIGHT,
            kind: if rng.gen_bool(0.3) {
                PlatformKind::Moving
            } else {
                PlatformKind::Static
            },
            speed: rng.gen_range(0.0..2.0),
            distance: rng.gen_range(0.0..200.0),
        })
        .collect()
}

fn generate_enemies<R: Rng + ?Sized>(difficulty: u32, rng: &mut R) -> Vec<EnemySpec> {
    let count = 5 + 2 * difficulty;
    (0..count)
        .map(|_| EnemySpec {
            x: rng.gen_range(0.0..PLACEMENT_WIDTH),
            y: rng.gen_range(0.0..PLACEMENT_HEIGHT),
            kind: pick_enemy_kind(difficulty, rng),
            health: 20.0 + 5.0 * difficulty as f32,
            damage: 5.0 + difficulty as f32,
            speed: 1.0 + 0.2 * difficulty as f32,
        })
        .collect()
}

/// Higher difficulty widens the range of selectable enemy types.
/// The hardest types only become reachable once difficulty reaches 12.
pub fn pick_enemy_kind<R: Rng + ?Sized>(difficulty: u32, rng: &mut R) -> EnemyKind {
    let roll = (rng.gen::<f32>() * difficulty as f32).floor() as usize;
    EnemyKind::ORDER[roll.min(EnemyKind::ORDER.len() - 1)]
}

fn generate_coins<R: Rng + ?Sized>(difficulty: u32, rng: &mut R) -> Vec<CoinSpec> {
    let count = 20 + 5 * difficulty;
    (0..count)
        .map(|_| CoinSpec {
            x: rng.gen_range(0.0..PLACEMENT_WIDTH),
            y: rng.gen_range(0.0..PLACEMENT_HEIGHT),
            value: if rng.gen_bool(0.1) { 5 } else { 1 },
        })
        .collect()
}

fn generate_powerups<R: Rng + ?Sized>(level: u32, rng: &mut R) -> Vec<PowerupSpec> {
    let count = 1 + level / 10;
    (0..count)
        .map(|_| PowerupSpec {
            x: rng.gen_range(0.0..PLACEMENT_WIDTH),
            y: rng.gen_range(0.0..PLACEMENT_HEIGHT),
            kind: PowerupKind::ALL[rng.gen_range(0..PowerupKind::ALL.len())],
            duration_ms: POWERUP_DURATION_MS,
        })
        .collect()
}

// =============================================================================
// Catalogue
// =============================================================================

/// Every level of a run, generated once up front
#[derive(Debug, Clone)]
pub struct LevelCatalogue {
    levels: Vec<LevelSpec>,
}

impl LevelCatalogue {
    /// Generate all `LEVEL_COUNT` levels. Level `n` always sits at index
    /// `n - 1`, so any failed level fails the whole catalogue.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, ContentError> {
        let mut levels = Vec::with_capacity(LEVEL_COUNT as usize);
        for level in 1..=LEVEL_COUNT {
            levels.push(generate_level_spec(level, rng)?);
        }
        let boss_levels = levels.iter().filter(|l| l.is_boss_level()).count();
        info!("Generated {} levels ({} boss levels)", levels.len(), boss_levels);
        Ok(Self { levels })
    }

    /// Look up a level; anything past the catalogue is a range error
    pub fn get(&self, level: u32) -> Result<&LevelSpec, ContentError> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .ok_or(ContentError::LevelOutOfRange {
                level,
                max: self.levels.len() as u32,
            })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Last playable level number
    pub fn last_level(&self) -> u32 {
        self.levels.len() as u32
    }
}
