//! Boss encounter state machine.
//!
//! A boss moves through three phases as its health drops below 60% and 30%.
//! Each phase cycles its own list of attack patterns. Entering a phase makes
//! the boss invulnerable for a fixed wall-clock window, and the final phase
//! enrages it for the rest of the fight (faster attacks, 1.5x movement).
//!
//! Per frame the order is fixed: phase check, deferred spawns, cooldowns,
//! movement, pattern, projectiles. Deferred spawns only ever run inside a
//! frame; damage between frames only closes an expired invulnerability window.

mod ability;
mod patterns;
mod projectile;

pub use ability::AbilityState;
pub use patterns::{default_pattern_table, PatternKind};
pub use projectile::{Projectile, PROJECTILE_RADIUS};

use std::f32::consts::TAU;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ascent_shared::{
    BossRender, BossSpec, BossStats, EffectTag, ElementTag, GameEvent, ProjectileRender, RectRender,
};

use crate::collision::{Rect, Vec2};
use crate::error::ContentError;
use crate::timers::{SharedClock, TaskScheduler};

/// Number of phases; the last one is terminal
pub const PHASE_COUNT: usize = 3;

/// Health ratio at or below which phase 1 starts
const PHASE_ONE_THRESHOLD: f32 = 0.6;

/// Health ratio at or below which phase 2 (enraged) starts
const PHASE_TWO_THRESHOLD: f32 = 0.3;

/// Invulnerability after a phase transition, in wall-clock time
pub const INVULNERABILITY_WINDOW: Duration = Duration::from_millis(2000);

const ENRAGE_SPEED_MULTIPLIER: f32 = 1.5;

/// Frames between patterns
pub const ATTACK_COOLDOWN: u32 = 120;
pub const ENRAGED_ATTACK_COOLDOWN: u32 = 90;

/// The boss stops approaching once this close to the player
const HOLD_DISTANCE: f32 = 100.0;

/// Rewards dropped on death, spread evenly on a circle
pub const REWARD_DROPS: usize = 5;
const REWARD_RADIUS: f32 = 50.0;

pub const BOSS_SPAWN: Vec2 = Vec2 { x: 400.0, y: 300.0 };
pub const BOSS_SIZE: f32 = 64.0;

const HEALTH_BAR_WIDTH: f32 = 100.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;
const HEALTH_BAR_OFFSET: f32 = 20.0;

const PHASE_EFFECT_SCALE: f32 = 50.0;
const DAMAGE_EFFECT_SCALE: f32 = 5.0;
const DEATH_EFFECT_SCALE: f32 = 50.0;
const TRAIL_EFFECT_SCALE: f32 = 1.0;

/// Work a boss defers to a later frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DeferredTask {
    SpawnAngled { angle: f32, speed: f32 },
    SpawnRing { count: u32, speed: f32 },
}

/// A live boss. Owned by the level for the duration of the encounter.
#[derive(Debug)]
pub struct Boss {
    boss_type: String,
    element: ElementTag,
    position: Vec2,
    width: f32,
    height: f32,
    stats: BossStats,
    current_health: f32,
    abilities: Vec<AbilityState>,
    patterns: Vec<Vec<PatternKind>>,
    phase: usize,
    pattern_index: usize,
    attack_cooldown: u32,
    is_invulnerable: bool,
    /// Clock reading at which the current invulnerability window closes
    invulnerable_until: Option<Duration>,
    is_enraged: bool,
    is_dead: bool,
    /// Set when the level unloads the boss without killing it
    retired: bool,
    projectiles: Vec<Projectile>,
    scheduler: TaskScheduler<DeferredTask>,
    events: Vec<GameEvent>,
    rng: StdRng,
}

impl Boss {
    /// Build a boss with the standard three-phase pattern table
    pub fn from_spec(spec: &BossSpec, clock: SharedClock) -> Result<Self, ContentError> {
        Self::with_patterns(spec, clock, default_pattern_table())
    }

    /// Build a boss with a custom pattern table.
    /// Every phase needs at least one pattern; extra phases are ignored.
    pub fn with_patterns(
        spec: &BossSpec,
        clock: SharedClock,
        mut patterns: Vec<Vec<PatternKind>>,
    ) -> Result<Self, ContentError> {
        for phase in 0..PHASE_COUNT {
            if patterns.get(phase).map_or(true, |p| p.is_empty()) {
                return Err(ContentError::MissingPatterns { phase });
            }
        }
        patterns.truncate(PHASE_COUNT);

        // Also rejects NaN
        if !(spec.stats.health > 0.0) {
            return Err(ContentError::InvalidHealth(spec.stats.health));
        }

        let abilities: Vec<AbilityState> = spec
            .ability_names
            .iter()
            .map(|name| AbilityState::resolve(name))
            .collect();

        info!(
            "Spawning boss {} ({}) with {} health and {} abilities",
            spec.boss_type,
            spec.element.name(),
            spec.stats.health,
            abilities.len()
        );

        Ok(Self {
            boss_type: spec.boss_type.clone(),
            element: spec.element,
            position: BOSS_SPAWN,
            width: BOSS_SIZE,
            height: BOSS_SIZE,
            stats: spec.stats,
            current_health: spec.stats.health,
            abilities,
            patterns,
            phase: 0,
            pattern_index: 0,
            attack_cooldown: 0,
            is_invulnerable: false,
            invulnerable_until: None,
            is_enraged: false,
            is_dead: false,
            retired: false,
            projectiles: Vec::new(),
            scheduler: TaskScheduler::new(clock),
            events: Vec::new(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Seed the RNG used by the random-angle pattern
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn boss_type(&self) -> &str {
        &self.boss_type
    }

    pub fn element(&self) -> ElementTag {
        self.element
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, self.width, self.height)
    }

    pub fn stats(&self) -> &BossStats {
        &self.stats
    }

    pub fn current_health(&self) -> f32 {
        self.current_health
    }

    pub fn health_ratio(&self) -> f32 {
        (self.current_health / self.stats.health).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn pattern_index(&self) -> usize {
        self.pattern_index
    }

    /// Pattern list of a phase
    pub fn patterns_for(&self, phase: usize) -> &[PatternKind] {
        self.patterns.get(phase).map(|p| p.as_slice()).unwrap_or(&[])
    }

    pub fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    pub fn is_invulnerable(&self) -> bool {
        self.is_invulnerable
    }

    pub fn is_enraged(&self) -> bool {
        self.is_enraged
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn abilities(&self) -> &[AbilityState] {
        &self.abilities
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Deferred spawns still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    fn is_live(&self) -> bool {
        !self.is_dead && !self.retired
    }

    // =========================================================================
    // Frame Update
    // =========================================================================

    /// Simulate one frame against the player's position.
    /// Returns the events produced since the last drain.
    pub fn update(&mut self, target: Vec2) -> Vec<GameEvent> {
        if !self.is_live() {
            return Vec::new();
        }

        self.expire_invulnerability();
        self.update_phase();
        self.run_deferred();

        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
        for ability in &mut self.abilities {
            ability.tick();
        }

        self.move_towards(target);

        if self.attack_cooldown == 0 {
            self.execute_current_pattern(target);
        }

        self.update_projectiles();

        std::mem::take(&mut self.events)
    }

    /// Simulate several frames in a row
    pub fn update_frames(&mut self, target: Vec2, frames: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(self.update(target));
        }
        events
    }

    fn run_deferred(&mut self) {
        for task in self.scheduler.take_due() {
            match task {
                DeferredTask::SpawnAngled { angle, speed } => self.spawn_projectile(angle, speed),
                DeferredTask::SpawnRing { count, speed } => self.spawn_ring(count, speed),
            }
        }
    }

    /// Checked every frame against the current ratio; entering a phase is
    /// one-way, so hovering around a threshold re-triggers nothing.
    fn update_phase(&mut self) {
        let ratio = self.health_ratio();
        let target_phase = if ratio <= PHASE_TWO_THRESHOLD {
            2
        } else if ratio <= PHASE_ONE_THRESHOLD {
            1
        } else {
            0
        };

        if target_phase > self.phase {
            self.enter_phase(target_phase);
        }
    }

    fn enter_phase(&mut self, phase: usize) {
        self.phase = phase;
        self.pattern_index = 0;
        self.begin_invulnerability();

        if phase == PHASE_COUNT - 1 && !self.is_enraged {
            self.is_enraged = true;
            self.stats.speed *= ENRAGE_SPEED_MULTIPLIER;
        }

        self.push_effect(EffectTag::PhaseTransition, Some(PHASE_EFFECT_SCALE));
        self.events.push(GameEvent::PhaseChanged {
            phase: phase as u8,
            enraged: self.is_enraged,
        });

        info!(
            "{} entered phase {} at {:.0}% health{}",
            self.boss_type,
            phase,
            self.health_ratio() * 100.0,
            if self.is_enraged { " (enraged)" } else { "" }
        );
    }

    fn begin_invulnerability(&mut self) {
        self.invulnerable_until = Some(self.scheduler.now() + INVULNERABILITY_WINDOW);
        self.is_invulnerable = true;
    }

    fn expire_invulnerability(&mut self) {
        if let Some(until) = self.invulnerable_until {
            if self.scheduler.now() >= until {
                self.invulnerable_until = None;
                self.is_invulnerable = false;
                debug!("{} is vulnerable again", self.boss_type);
            }
        }
    }

    fn move_towards(&mut self, target: Vec2) {
        let offset = target - self.position;
        let distance = offset.length();
        if distance > HOLD_DISTANCE {
            self.position = self.position + offset * (self.stats.speed / distance);
        }
    }

    fn execute_current_pattern(&mut self, target: Vec2) {
        let phase_patterns = &self.patterns[self.phase];
        let count = phase_patterns.len();
        let kind = phase_patterns[self.pattern_index];

        patterns::execute(self, kind, target);
        debug!(
            "{} fired {} (phase {}, pattern {})",
            self.boss_type,
            kind.name(),
            self.phase,
            self.pattern_index
        );

        self.pattern_index = (self.pattern_index + 1) % count;
        self.attack_cooldown = if self.is_enraged {
            ENRAGED_ATTACK_COOLDOWN
        } else {
            ATTACK_COOLDOWN
        };
    }

    fn update_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.update();
            if projectile.active && projectile.in_arena() {
                self.events.push(GameEvent::Effect {
                    tag: EffectTag::Trail,
                    x: projectile.x,
                    y: projectile.y,
                    scale: Some(TRAIL_EFFECT_SCALE),
                    element: Some(projectile.element),
                });
            }
        }
        self.projectiles.retain(|p| p.active && p.in_arena());
    }

    // =========================================================================
    // Damage and Death
    // =========================================================================

    /// Apply damage unless invulnerable. Negative amounts count as zero.
    /// Reaching zero health kills the boss exactly once; later calls are no-ops.
    pub fn take_damage(&mut self, amount: f32) -> Vec<GameEvent> {
        if !self.is_live() {
            return Vec::new();
        }

        // The window may have closed since the last frame. Pending spawns
        // wait for the next frame.
        self.expire_invulnerability();

        if !self.is_invulnerable {
            self.current_health = (self.current_health - amount.max(0.0)).max(0.0);
            self.push_effect(EffectTag::Damage, Some(DAMAGE_EFFECT_SCALE));
            self.events.push(GameEvent::BossHealth {
                ratio: self.health_ratio(),
            });

            if self.current_health <= 0.0 {
                self.die();
            }
        }

        std::mem::take(&mut self.events)
    }

    /// Restore health up to the maximum. Never moves the boss to an earlier phase.
    pub fn heal(&mut self, amount: f32) {
        if !self.is_live() {
            return;
        }
        self.current_health = (self.current_health + amount.max(0.0)).min(self.stats.health);
    }

    fn die(&mut self) {
        if self.is_dead {
            return;
        }
        self.is_dead = true;
        self.is_invulnerable = false;
        self.invulnerable_until = None;
        let cancelled = self.scheduler.close();

        self.push_effect(EffectTag::Explosion, Some(DEATH_EFFECT_SCALE));

        for i in 0..REWARD_DROPS {
            let angle = (i as f32 / REWARD_DROPS as f32) * TAU;
            let drop = self.position + Vec2::from_angle(angle) * REWARD_RADIUS;
            self.events.push(GameEvent::PowerupDrop { x: drop.x, y: drop.y });
        }

        self.events.push(GameEvent::BossDefeated {
            boss_type: self.boss_type.clone(),
            element: self.element,
        });

        info!(
            "{} defeated ({} deferred tasks cancelled)",
            self.boss_type, cancelled
        );
    }

    /// Stop the boss without killing it (level unload). Pending deferred
    /// tasks are cancelled and further updates do nothing.
    pub fn shutdown(&mut self) -> usize {
        if self.retired {
            return 0;
        }
        self.retired = true;
        self.is_invulnerable = false;
        self.invulnerable_until = None;
        let cancelled = self.scheduler.close();
        debug!("{} shut down, {} deferred tasks cancelled", self.boss_type, cancelled);
        cancelled
    }

    // =========================================================================
    // Abilities
    // =========================================================================

    /// Trigger an ability by name if it is off cooldown.
    /// Its effect event is returned with the next update.
    pub fn use_ability(&mut self, name: &str) -> bool {
        if !self.is_live() {
            return false;
        }
        let Some(ability) = self.abilities.iter_mut().find(|a| a.name == name) else {
            return false;
        };
        if !ability.try_activate() {
            return false;
        }
        debug!("{} used {}", self.boss_type, name);
        self.push_effect(EffectTag::Ability, None);
        true
    }

    // =========================================================================
    // Projectiles
    // =========================================================================

    /// Deactivate every projectile touching `target` and return their total damage
    pub fn resolve_hits(&mut self, target: &Rect) -> f32 {
        let mut damage = 0.0;
        for projectile in self.projectiles.iter_mut().filter(|p| p.active) {
            if projectile.bounds().intersects(target) {
                projectile.active = false;
                damage += projectile.damage;
            }
        }
        self.projectiles.retain(|p| p.active);
        damage
    }

    fn spawn_projectile(&mut self, angle: f32, speed: f32) {
        self.projectiles.push(Projectile::at_angle(
            self.position,
            angle,
            speed,
            self.stats.damage,
            self.element,
        ));
    }

    fn spawn_ring(&mut self, count: u32, speed: f32) {
        for i in 0..count {
            let angle = (i as f32 / count as f32) * TAU;
            self.spawn_projectile(angle, speed);
        }
    }

    fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        if self.scheduler.schedule_after(delay, task).is_none() {
            debug!("{} dropped a deferred spawn after shutdown", self.boss_type);
        }
    }

    fn push_effect(&mut self, tag: EffectTag, scale: Option<f32>) {
        self.events.push(GameEvent::Effect {
            tag,
            x: self.position.x,
            y: self.position.y,
            scale,
            element: Some(self.element),
        });
    }

    // =========================================================================
    // Render State
    // =========================================================================

    pub fn render(&self) -> BossRender {
        let body = self.bounds();
        let bar_x = self.position.x - HEALTH_BAR_WIDTH / 2.0;
        let bar_y = body.y - HEALTH_BAR_OFFSET;
        let ratio = self.health_ratio();

        BossRender {
            body: RectRender {
                x: body.x,
                y: body.y,
                width: body.width,
                height: body.height,
                color: self.element.color().to_string(),
            },
            health_bar_back: RectRender {
                x: bar_x,
                y: bar_y,
                width: HEALTH_BAR_WIDTH,
                height: HEALTH_BAR_HEIGHT,
                color: "#333333".to_string(),
            },
            health_bar_fill: RectRender {
                x: bar_x,
                y: bar_y,
                width: HEALTH_BAR_WIDTH * ratio,
                height: HEALTH_BAR_HEIGHT,
                color: "#ff0000".to_string(),
            },
            health_ratio: ratio,
            phase: self.phase as u8,
            enraged: self.is_enraged,
            invulnerable: self.is_invulnerable,
        }
    }

    pub fn render_projectiles(&self) -> Vec<ProjectileRender> {
        self.projectiles.iter().map(Projectile::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use rand::Rng;

    use crate::generator::generate_boss_spec;
    use crate::timers::ManualClock;

    fn level_three_boss() -> (ManualClock, Boss) {
        let clock = ManualClock::new();
        let spec = generate_boss_spec(3).expect("level 3 has a boss");
        let boss = Boss::from_spec(&spec, Arc::new(clock.clone()))
            .expect("valid boss")
            .with_seed(1);
        (clock, boss)
    }

    fn boss_with(patterns: Vec<Vec<PatternKind>>) -> (ManualClock, Boss) {
        let clock = ManualClock::new();
        let spec = generate_boss_spec(3).expect("level 3 has a boss");
        let boss = Boss::with_patterns(&spec, Arc::new(clock.clone()), patterns).expect("valid boss");
        (clock, boss)
    }

    fn count_defeats(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossDefeated { .. }))
            .count()
    }

    #[test]
    fn test_level_three_encounter() {
        let (clock, mut boss) = level_three_boss();
        let player = boss.position();
        assert_eq!(boss.element(), ElementTag::Fire);
        assert_eq!(boss.boss_type(), "Phoenix");
        assert_eq!(boss.stats().health, 100.0);

        boss.take_damage(41.0);
        boss.update(player);
        assert_eq!(boss.phase(), 1);
        assert!(boss.is_invulnerable());
        assert_eq!(boss.pattern_index(), 1);

        // Damage during the window is ignored
        boss.take_damage(10.0);
        assert_eq!(boss.current_health(), 59.0);

        clock.advance(Duration::from_millis(1999));
        boss.update(player);
        assert!(boss.is_invulnerable());

        clock.advance(Duration::from_millis(1));
        boss.update(player);
        assert!(!boss.is_invulnerable());

        boss.take_damage(30.0);
        boss.update(player);
        assert_eq!(boss.phase(), 2);
        assert!(boss.is_enraged());
        assert_eq!(boss.stats().speed, 3.0);

        // Hover around the 30% line; the speed boost must not compound
        clock.advance(INVULNERABILITY_WINDOW);
        boss.update(player);
        for _ in 0..5 {
            boss.heal(5.0);
            boss.update(player);
            boss.take_damage(5.0);
            boss.update(player);
        }
        assert_eq!(boss.phase(), 2);
        assert!(boss.is_enraged());
        assert_eq!(boss.stats().speed, 3.0);
    }

    #[test]
    fn test_phase_never_regresses() {
        let (clock, mut boss) = level_three_boss();
        let mut rng = StdRng::seed_from_u64(42);
        let player = boss.position();
        let mut last_phase = 0;

        for _ in 0..500 {
            if rng.gen_bool(0.3) {
                boss.heal(rng.gen_range(0.0..40.0));
            } else {
                boss.take_damage(rng.gen_range(0.0..6.0));
            }
            clock.advance(Duration::from_millis(rng.gen_range(0..400)));
            boss.update(player);

            assert!(boss.phase() >= last_phase);
            assert!(boss.pattern_index() < boss.patterns_for(boss.phase()).len());
            last_phase = boss.phase();
            if boss.is_dead() {
                break;
            }
        }
    }

    #[test]
    fn test_health_clamps_at_zero() {
        let (_clock, mut boss) = level_three_boss();

        boss.take_damage(-25.0);
        assert_eq!(boss.current_health(), 100.0);

        boss.take_damage(12.5);
        assert_eq!(boss.current_health(), 87.5);

        boss.take_damage(10_000.0);
        assert_eq!(boss.current_health(), 0.0);
        assert!(boss.is_dead());
    }

    #[test]
    fn test_damage_reports_health_ratio() {
        let (_clock, mut boss) = level_three_boss();
        let events = boss.take_damage(25.0);
        assert!(events.contains(&GameEvent::BossHealth { ratio: 0.75 }));
    }

    #[test]
    fn test_invulnerability_ignores_call_volume() {
        let (clock, mut boss) = level_three_boss();
        let player = boss.position();
        boss.take_damage(50.0);
        boss.update(player);
        assert!(boss.is_invulnerable());

        for _ in 0..1000 {
            assert!(boss
                .take_damage(1.0)
                .iter()
                .all(|e| !matches!(e, GameEvent::BossHealth { .. })));
        }
        assert_eq!(boss.current_health(), 50.0);

        // The window closes on the next damage call even without a frame
        clock.advance(INVULNERABILITY_WINDOW);
        boss.take_damage(1.0);
        assert!(!boss.is_invulnerable());
        assert_eq!(boss.current_health(), 49.0);
    }

    #[test]
    fn test_pattern_cycle_is_fixed() {
        let (_clock, mut boss) = level_three_boss();
        let player = boss.position();
        assert_eq!(
            boss.patterns_for(0),
            &[PatternKind::Basic, PatternKind::Circular, PatternKind::Random]
        );

        // First frame fires Basic immediately
        boss.update(player);
        assert_eq!(boss.pattern_index(), 1);
        assert_eq!(boss.attack_cooldown(), ATTACK_COOLDOWN);
        assert_eq!(boss.projectiles().len(), 1);

        // Circular: the basic shot has left the arena by now
        boss.update_frames(player, ATTACK_COOLDOWN);
        assert_eq!(boss.pattern_index(), 2);
        assert_eq!(boss.projectiles().len(), 8);

        // Random: the ring has left the arena by now
        boss.update_frames(player, ATTACK_COOLDOWN);
        assert_eq!(boss.pattern_index(), 0);
        assert_eq!(boss.projectiles().len(), 5);

        boss.update_frames(player, ATTACK_COOLDOWN);
        assert_eq!(boss.pattern_index(), 1);
    }

    #[test]
    fn test_enraged_boss_attacks_faster() {
        let (clock, mut boss) = level_three_boss();
        let player = boss.position();
        boss.take_damage(75.0);
        boss.update(player);
        assert!(boss.is_enraged());
        clock.advance(INVULNERABILITY_WINDOW);

        let max_cooldown = (0..200)
            .map(|_| {
                boss.update(player);
                boss.attack_cooldown()
            })
            .max();
        assert_eq!(max_cooldown, Some(ENRAGED_ATTACK_COOLDOWN));
    }

    #[test]
    fn test_death_is_idempotent() {
        let (_clock, mut boss) = level_three_boss();
        let origin = boss.position();

        let events = boss.take_damage(500.0);
        assert_eq!(count_defeats(&events), 1);

        let drops: Vec<(f32, f32)> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PowerupDrop { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(drops.len(), REWARD_DROPS);
        assert!((drops[0].0 - (origin.x + 50.0)).abs() < 0.001);
        assert!((drops[0].1 - origin.y).abs() < 0.001);
        for (x, y) in &drops {
            assert!((Vec2::new(*x, *y).distance_to(origin) - 50.0).abs() < 0.001);
        }

        for _ in 0..10 {
            assert!(boss.take_damage(10.0).is_empty());
            assert!(boss.update(origin).is_empty());
        }
    }

    #[test]
    fn test_staggered_spiral() {
        let (clock, mut boss) = boss_with(vec![
            vec![PatternKind::Spiral],
            vec![PatternKind::Spiral],
            vec![PatternKind::Spiral],
        ]);
        let player = boss.position();

        boss.update(player);
        assert_eq!(boss.pending_tasks(), 20);
        assert!(boss.projectiles().is_empty());

        // The zero-delay spawn fires on the next frame
        boss.update(player);
        assert_eq!(boss.projectiles().len(), 1);

        clock.advance(Duration::from_millis(450));
        boss.update(player);
        assert_eq!(boss.projectiles().len(), 5);
        assert!(boss.projectiles().iter().all(|p| (p.speed() - 3.0).abs() < 0.001));
    }

    #[test]
    fn test_bullet_hell_waves_speed_up() {
        let (clock, mut boss) = boss_with(vec![
            vec![PatternKind::BulletHell],
            vec![PatternKind::BulletHell],
            vec![PatternKind::BulletHell],
        ]);
        let player = boss.position();

        boss.update(player);
        boss.update(player);
        assert_eq!(boss.projectiles().len(), 12);

        clock.advance(Duration::from_millis(500));
        boss.update(player);
        assert_eq!(boss.projectiles().len(), 24);

        clock.advance(Duration::from_millis(500));
        boss.update(player);
        assert_eq!(boss.projectiles().len(), 36);

        let speeds: Vec<f32> = boss.projectiles().iter().map(Projectile::speed).collect();
        assert!(speeds[..12].iter().all(|s| (s - 3.0).abs() < 0.001));
        assert!(speeds[12..24].iter().all(|s| (s - 4.0).abs() < 0.001));
        assert!(speeds[24..].iter().all(|s| (s - 5.0).abs() < 0.001));
    }

    #[test]
    fn test_death_cancels_pending_spawns() {
        let (clock, mut boss) = boss_with(vec![
            vec![PatternKind::Spiral],
            vec![PatternKind::Spiral],
            vec![PatternKind::Spiral],
        ]);
        let player = boss.position();
        boss.update(player);
        assert_eq!(boss.pending_tasks(), 20);

        boss.take_damage(1000.0);
        assert_eq!(boss.pending_tasks(), 0);

        clock.advance(Duration::from_secs(5));
        boss.update(player);
        assert!(boss.projectiles().is_empty());
    }

    #[test]
    fn test_damage_between_frames_leaves_spawns_to_the_frame() {
        let (clock, mut boss) = boss_with(vec![vec![PatternKind::Spiral]; 3]);
        let player = boss.position();
        boss.update(player);

        clock.advance(Duration::from_millis(1000));
        boss.take_damage(1.0);
        assert!(boss.projectiles().is_empty());
        assert_eq!(boss.pending_tasks(), 20);
        assert_eq!(boss.current_health(), 99.0);

        boss.update(player);
        assert_eq!(boss.projectiles().len(), 11);
        assert_eq!(boss.pending_tasks(), 9);
    }

    #[test]
    fn test_killing_blow_mid_pattern_spawns_nothing() {
        let (clock, mut boss) = boss_with(vec![vec![PatternKind::BulletHell]; 3]);
        let player = boss.position();
        boss.update(player);

        clock.advance(Duration::from_millis(1000));
        let events = boss.take_damage(1000.0);
        assert_eq!(count_defeats(&events), 1);
        assert!(boss.projectiles().is_empty());
        assert_eq!(boss.pending_tasks(), 0);
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let (clock, mut boss) = boss_with(vec![vec![PatternKind::Spiral]; 3]);
        let player = boss.position();
        boss.take_damage(50.0);
        boss.update(player);
        assert!(boss.is_invulnerable());
        assert_eq!(boss.pending_tasks(), 20);

        assert_eq!(boss.shutdown(), 20);
        assert!(!boss.is_invulnerable());
        clock.advance(Duration::from_secs(5));
        assert!(boss.update(player).is_empty());
        assert!(boss.take_damage(10.0).is_empty());
        assert_eq!(boss.current_health(), 50.0);
        assert!(boss.projectiles().is_empty());
    }

    #[test]
    fn test_default_table_per_phase() {
        let (_clock, boss) = level_three_boss();
        use PatternKind::*;
        assert_eq!(boss.patterns_for(0), &[Basic, Circular, Random]);
        assert_eq!(boss.patterns_for(1), &[Dual, Cross, Spiral]);
        assert_eq!(boss.patterns_for(2), &[BulletHell, Combination, Ultimate]);
        assert!(boss.patterns_for(3).is_empty());
    }

    #[test]
    fn test_each_pattern_fires_the_same_volley() {
        use PatternKind::*;
        let volleys = [
            (Basic, 1, 0),
            (Circular, 8, 0),
            (Random, 5, 0),
            (Dual, 2, 0),
            (Cross, 4, 0),
            (Spiral, 0, 20),
            (BulletHell, 0, 3),
            (Combination, 9, 0),
            (Ultimate, 9, 20),
        ];

        for (kind, immediate, deferred) in volleys {
            for _ in 0..2 {
                let (_clock, mut boss) = boss_with(vec![vec![kind]; 3]);
                let player = boss.position() + Vec2::new(300.0, 0.0);
                boss.update(player);
                assert_eq!(boss.projectiles().len(), immediate, "{}", kind.name());
                assert_eq!(boss.pending_tasks(), deferred, "{}", kind.name());
            }
        }
    }

    #[test]
    fn test_dual_fans_out_from_the_player() {
        let (_clock, mut boss) = boss_with(vec![vec![PatternKind::Dual]; 3]);
        let player = boss.position() + Vec2::new(300.0, 0.0);
        boss.update(player);

        let spread = 15.0_f32.to_radians();
        let angles: Vec<f32> = boss
            .projectiles()
            .iter()
            .map(|p| p.velocity_y.atan2(p.velocity_x))
            .collect();
        assert_eq!(angles.len(), 2);
        assert!((angles[0] + spread).abs() < 0.001);
        assert!((angles[1] - spread).abs() < 0.001);
        assert!(boss.projectiles().iter().all(|p| (p.speed() - 5.0).abs() < 0.001));
    }

    #[test]
    fn test_cross_fires_along_the_axes() {
        let (_clock, mut boss) = boss_with(vec![vec![PatternKind::Cross]; 3]);
        boss.update(boss.position());

        let directions: Vec<(f32, f32)> = boss
            .projectiles()
            .iter()
            .map(|p| ((p.velocity_x / 4.0).round(), (p.velocity_y / 4.0).round()))
            .collect();
        assert_eq!(directions, vec![(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)]);
    }

    #[test]
    fn test_missing_patterns_are_rejected() {
        let clock: SharedClock = Arc::new(ManualClock::new());
        let spec = generate_boss_spec(3).expect("boss level");

        let result = Boss::with_patterns(&spec, clock.clone(), vec![vec![PatternKind::Basic], vec![]]);
        assert!(matches!(result, Err(ContentError::MissingPatterns { phase: 1 })));

        let result = Boss::with_patterns(&spec, clock.clone(), vec![vec![PatternKind::Basic]; 2]);
        assert!(matches!(result, Err(ContentError::MissingPatterns { phase: 2 })));

        let mut broken = spec.clone();
        broken.stats.health = 0.0;
        assert!(matches!(
            Boss::from_spec(&broken, clock),
            Err(ContentError::InvalidHealth(_))
        ));
    }

    #[test]
    fn test_boss_keeps_attack_range() {
        let (_clock, mut boss) = level_three_boss();
        let start = boss.position();

        boss.update(start + Vec2::new(50.0, 0.0));
        assert_eq!(boss.position(), start);

        boss.update(start + Vec2::new(300.0, 0.0));
        assert!((boss.position().x - (start.x + 2.0)).abs() < 0.001);
        assert!((boss.position().y - start.y).abs() < 0.001);
    }

    #[test]
    fn test_abilities_resolve_once_and_cool_down() {
        let (_clock, mut boss) = level_three_boss();
        let names: Vec<&str> = boss.abilities().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Rebirth Flames", "Fire Storm", "Wing Blast"]);
        assert_eq!(boss.abilities()[0].max_cooldown, 360);

        assert!(boss.use_ability("Wing Blast"));
        assert!(!boss.use_ability("Wing Blast"));
        assert!(!boss.use_ability("Unknown"));

        let events = boss.update(boss.position());
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Effect { tag: EffectTag::Ability, .. })));
        assert_eq!(boss.abilities()[2].cooldown_remaining, 89);
    }

    #[test]
    fn test_projectile_hits_are_consumed() {
        let (_clock, mut boss) = level_three_boss();
        let start = boss.position();
        boss.update(start);
        assert_eq!(boss.projectiles().len(), 1);

        let shot = boss.projectiles()[0].position();
        let player = Rect::centered(shot, 32.0, 48.0);
        assert_eq!(boss.resolve_hits(&player), 10.0);
        assert!(boss.projectiles().is_empty());
        assert_eq!(boss.resolve_hits(&player), 0.0);
    }
}
