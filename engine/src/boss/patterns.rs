//! Attack patterns, dispatched by kind.
//!
//! Staggered patterns (spiral, bullet hell) do not spawn everything at once;
//! they schedule deferred spawns on the boss's own scheduler so that killing
//! or unloading the boss cancels whatever has not fired yet.

use std::f32::consts::TAU;
use std::time::Duration;

use rand::Rng;

use super::{Boss, DeferredTask};
use crate::collision::Vec2;

const BASIC_SPEED: f32 = 5.0;
const CIRCULAR_COUNT: u32 = 8;
const CIRCULAR_SPEED: f32 = 4.0;
const RANDOM_COUNT: u32 = 5;
const RANDOM_SPEED: f32 = 4.0;
const DUAL_SPREAD: f32 = 15.0 * std::f32::consts::PI / 180.0;
const DUAL_SPEED: f32 = 5.0;
const CROSS_SPEED: f32 = 4.0;

const SPIRAL_COUNT: u32 = 20;
const SPIRAL_SPEED: f32 = 3.0;
const SPIRAL_STAGGER: Duration = Duration::from_millis(100);

const BULLET_HELL_WAVES: u32 = 3;
const BULLET_HELL_PER_WAVE: u32 = 12;
const BULLET_HELL_BASE_SPEED: f32 = 3.0;
const BULLET_HELL_WAVE_GAP: Duration = Duration::from_millis(500);

/// Named attack behaviors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// One shot aimed at the player
    Basic,
    /// Eight shots in a full circle
    Circular,
    /// A handful of shots at random angles
    Random,
    /// Two aimed shots fanned out to either side
    Dual,
    /// Four shots along the axes
    Cross,
    /// Twenty shots around the circle, 100 ms apart
    Spiral,
    /// Three rings of twelve, 500 ms apart, each ring faster
    BulletHell,
    /// Basic and Circular together
    Combination,
    /// Circular, Spiral and an aimed shot
    Ultimate,
}

impl PatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Circular => "circular",
            Self::Random => "random",
            Self::Dual => "dual",
            Self::Cross => "cross",
            Self::Spiral => "spiral",
            Self::BulletHell => "bullet-hell",
            Self::Combination => "combination",
            Self::Ultimate => "ultimate",
        }
    }
}

/// Three patterns per phase, fired in order
pub fn default_pattern_table() -> Vec<Vec<PatternKind>> {
    use PatternKind::*;
    vec![
        vec![Basic, Circular, Random],
        vec![Dual, Cross, Spiral],
        vec![BulletHell, Combination, Ultimate],
    ]
}

/// Run one pattern for `boss` against `target`
pub(super) fn execute(boss: &mut Boss, kind: PatternKind, target: Vec2) {
    match kind {
        PatternKind::Basic => basic(boss, target),
        PatternKind::Circular => circular(boss),
        PatternKind::Random => random(boss),
        PatternKind::Dual => dual(boss, target),
        PatternKind::Cross => cross(boss),
        PatternKind::Spiral => spiral(boss),
        PatternKind::BulletHell => bullet_hell(boss),
        PatternKind::Combination => {
            basic(boss, target);
            circular(boss);
        }
        PatternKind::Ultimate => {
            circular(boss);
            spiral(boss);
            basic(boss, target);
        }
    }
}

fn basic(boss: &mut Boss, target: Vec2) {
    let angle = boss.position.angle_to(target);
    boss.spawn_projectile(angle, BASIC_SPEED);
}

fn circular(boss: &mut Boss) {
    boss.spawn_ring(CIRCULAR_COUNT, CIRCULAR_SPEED);
}

fn random(boss: &mut Boss) {
    for _ in 0..RANDOM_COUNT {
        let angle = boss.rng.gen_range(0.0..TAU);
        boss.spawn_projectile(angle, RANDOM_SPEED);
    }
}

fn dual(boss: &mut Boss, target: Vec2) {
    let angle = boss.position.angle_to(target);
    boss.spawn_projectile(angle - DUAL_SPREAD, DUAL_SPEED);
    boss.spawn_projectile(angle + DUAL_SPREAD, DUAL_SPEED);
}

fn cross(boss: &mut Boss) {
    boss.spawn_ring(4, CROSS_SPEED);
}

fn spiral(boss: &mut Boss) {
    let step = TAU / SPIRAL_COUNT as f32;
    for i in 0..SPIRAL_COUNT {
        boss.schedule(
            SPIRAL_STAGGER * i,
            DeferredTask::SpawnAngled {
                angle: step * i as f32,
                speed: SPIRAL_SPEED,
            },
        );
    }
}

fn bullet_hell(boss: &mut Boss) {
    for wave in 0..BULLET_HELL_WAVES {
        boss.schedule(
            BULLET_HELL_WAVE_GAP * wave,
            DeferredTask::SpawnRing {
                count: BULLET_HELL_PER_WAVE,
                speed: BULLET_HELL_BASE_SPEED + wave as f32,
            },
        );
    }
}
