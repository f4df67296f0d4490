//! Level orchestration.
//!
//! The `LevelManager` owns every live entity of the loaded level, including
//! the boss. It drives them once per frame, routes damage, dispatches the
//! boss's events to the collaborators and signals completion exactly once.

mod entities;

pub use entities::{Coin, Enemy, Platform, Powerup};

use log::{debug, info, warn};

use ascent_shared::{GameEvent, PowerupKind, RenderSnapshot};

use crate::boss::Boss;
use crate::collaborators::Collaborators;
use crate::collision::{Rect, Vec2};
use crate::error::ContentError;
use crate::generator::LevelCatalogue;
use crate::timers::SharedClock;

pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 48.0;

/// Read-only view of the player used for targeting and collisions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    /// Centre of the player's body
    pub position: Vec2,
}

impl PlayerView {
    pub fn new(x: f32, y: f32) -> Self {
        Self { position: Vec2::new(x, y) }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

/// What happened to the player during one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Total value of coins picked up
    pub coins: u32,
    pub powerups: Vec<PowerupKind>,
    /// Damage from enemy contact and boss projectiles
    pub player_damage: f32,
    /// True only on the frame the level completed
    pub level_complete: bool,
}

/// Result of a player attack against an area
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttackReport {
    pub enemies_hit: u32,
    pub enemies_defeated: u32,
    pub boss_hit: bool,
    pub boss_defeated: bool,
}

pub struct LevelManager {
    catalogue: LevelCatalogue,
    clock: SharedClock,
    boss_seed: Option<u64>,
    level: Option<u32>,
    background: String,
    music: String,
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    coins: Vec<Coin>,
    powerups: Vec<Powerup>,
    boss: Option<Boss>,
    has_boss: bool,
    boss_defeated: bool,
    completed: bool,
    frame: u64,
}

impl LevelManager {
    pub fn new(catalogue: LevelCatalogue, clock: SharedClock) -> Self {
        Self {
            catalogue,
            clock,
            boss_seed: None,
            level: None,
            background: String::new(),
            music: String::new(),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            has_boss: false,
            boss_defeated: false,
            completed: false,
            frame: 0,
        }
    }

    /// Seed boss RNGs so random patterns are reproducible
    pub fn with_boss_seed(mut self, seed: u64) -> Self {
        self.boss_seed = Some(seed);
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replace the current level with `level` from the catalogue.
    /// Fails for levels outside the catalogue or with an unusable boss.
    pub fn load_level(&mut self, level: u32) -> Result<(), ContentError> {
        let spec = self.catalogue.get(level)?.clone();

        let boss = match &spec.boss {
            Some(boss_spec) => {
                let boss = Boss::from_spec(boss_spec, self.clock.clone())?;
                Some(match self.boss_seed {
                    Some(seed) => boss.with_seed(seed.wrapping_add(level as u64)),
                    None => boss,
                })
            }
            None => None,
        };

        self.unload();

        self.level = Some(level);
        self.background = spec.background;
        self.music = spec.music;
        self.platforms = spec.platforms.iter().map(Platform::from_spec).collect();
        self.enemies = spec
            .enemies
            .iter()
            .enumerate()
            .map(|(id, e)| Enemy::from_spec(id as u64, e))
            .collect();
        self.coins = spec.coins.iter().map(Coin::from_spec).collect();
        self.powerups = spec.powerups.iter().map(Powerup::from_spec).collect();
        self.has_boss = boss.is_some();
        self.boss = boss;

        info!(
            "Loaded level {} (difficulty {}): {} platforms, {} enemies, {} coins, {} powerups{}",
            level,
            spec.difficulty,
            self.platforms.len(),
            self.enemies.len(),
            self.coins.len(),
            self.powerups.len(),
            match &self.boss {
                Some(boss) => format!(", boss {}", boss.boss_type()),
                None => String::new(),
            }
        );
        Ok(())
    }

    /// Tear down the current level. The boss is shut down first so none of
    /// its deferred tasks outlive it. Returns the number of tasks cancelled.
    pub fn unload(&mut self) -> usize {
        let cancelled = match self.boss.take() {
            Some(mut boss) => boss.shutdown(),
            None => 0,
        };
        if let Some(level) = self.level.take() {
            debug!("Unloaded level {} ({} boss tasks cancelled)", level, cancelled);
        }
        self.platforms.clear();
        self.enemies.clear();
        self.coins.clear();
        self.powerups.clear();
        self.background.clear();
        self.music.clear();
        self.has_boss = false;
        self.boss_defeated = false;
        self.completed = false;
        self.frame = 0;
        cancelled
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn current_level(&self) -> Option<u32> {
        self.level
    }

    /// Next level in the catalogue, if there is one
    pub fn next_level(&self) -> Option<u32> {
        self.level
            .map(|l| l + 1)
            .filter(|l| *l <= self.catalogue.last_level())
    }

    pub fn catalogue(&self) -> &LevelCatalogue {
        &self.catalogue
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.boss.as_ref()
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn powerups(&self) -> &[Powerup] {
        &self.powerups
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn music(&self) -> &str {
        &self.music
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    // =========================================================================
    // Frame Update
    // =========================================================================

    /// Simulate one frame of the loaded level
    pub fn update<C: Collaborators>(&mut self, player: &PlayerView, collaborators: &mut C) -> FrameReport {
        let mut report = FrameReport::default();
        if self.level.is_none() {
            return report;
        }
        self.frame += 1;
        let player_bounds = player.bounds();

        for platform in &mut self.platforms {
            platform.update();
        }

        for enemy in &mut self.enemies {
            if let Some(damage) = enemy.update(&player_bounds) {
                report.player_damage += damage;
            }
        }

        for powerup in &mut self.powerups {
            powerup.update(self.frame);
            if powerup.active && powerup.bounds().intersects(&player_bounds) {
                powerup.active = false;
                report.powerups.push(powerup.kind);
            }
        }
        self.powerups.retain(|p| p.active);

        for coin in &mut self.coins {
            if !coin.collected && coin.bounds.intersects(&player_bounds) {
                coin.collected = true;
                report.coins += coin.value;
            }
        }
        self.coins.retain(|c| !c.collected);

        if let Some(boss) = self.boss.as_mut() {
            let events = boss.update(player.position);
            report.player_damage += boss.resolve_hits(&player_bounds);
            self.handle_boss_events(events, collaborators);
        }

        report.level_complete = self.check_completion(collaborators);
        report
    }

    /// Apply player damage to the boss
    pub fn damage_boss<C: Collaborators>(&mut self, amount: f32, collaborators: &mut C) -> bool {
        let Some(boss) = self.boss.as_mut() else {
            return false;
        };
        let events = boss.take_damage(amount);
        let defeated = self.handle_boss_events(events, collaborators);
        self.check_completion(collaborators);
        defeated
    }

    /// Apply player damage to a single enemy. Returns true if it died.
    pub fn damage_enemy<C: Collaborators>(&mut self, id: u64, amount: f32, collaborators: &mut C) -> bool {
        let killed = self
            .enemies
            .iter_mut()
            .find(|e| e.id == id)
            .map_or(false, |e| e.take_damage(amount));
        if killed {
            self.enemies.retain(Enemy::is_alive);
            self.check_completion(collaborators);
        }
        killed
    }

    /// Hit everything overlapping `area`
    pub fn attack<C: Collaborators>(&mut self, area: &Rect, amount: f32, collaborators: &mut C) -> AttackReport {
        let mut report = AttackReport::default();

        for enemy in self.enemies.iter_mut().filter(|e| e.bounds.intersects(area)) {
            report.enemies_hit += 1;
            if enemy.take_damage(amount) {
                report.enemies_defeated += 1;
            }
        }
        self.enemies.retain(Enemy::is_alive);

        let boss_in_reach = self
            .boss
            .as_ref()
            .map_or(false, |b| b.bounds().intersects(area));
        if boss_in_reach {
            report.boss_hit = true;
            report.boss_defeated = self.damage_boss(amount, collaborators);
        }

        self.check_completion(collaborators);
        report
    }

    /// Forward boss events to the collaborators. Returns true if the boss
    /// died, in which case it has been removed from the level.
    fn handle_boss_events<C: Collaborators>(&mut self, events: Vec<GameEvent>, collaborators: &mut C) -> bool {
        let mut defeated = false;
        for event in events {
            match event {
                GameEvent::Effect { tag, x, y, scale, element } => {
                    collaborators.emit(tag.as_str(element), x, y, scale, element);
                }
                GameEvent::BossHealth { ratio } => collaborators.update_boss_health(ratio),
                GameEvent::PhaseChanged { phase, enraged } => {
                    debug!("Boss phase {} (enraged: {})", phase, enraged);
                }
                GameEvent::PowerupDrop { x, y } => collaborators.spawn_powerup(x, y),
                GameEvent::BossDefeated { .. } => {
                    if let Some(boss) = self.boss.as_ref() {
                        collaborators.on_boss_defeated(boss);
                    }
                    defeated = true;
                }
            }
        }

        if defeated {
            self.boss = None;
            self.boss_defeated = true;
        }
        defeated
    }

    /// Completion fires once: on boss defeat for boss levels, or once every
    /// enemy is gone for levels without one
    fn check_completion<C: Collaborators>(&mut self, collaborators: &mut C) -> bool {
        let Some(level) = self.level else {
            return false;
        };
        if self.completed {
            return false;
        }

        let done = if self.has_boss {
            self.boss_defeated
        } else {
            self.enemies.is_empty()
        };
        if !done {
            return false;
        }

        self.completed = true;
        collaborators.on_level_complete(level);
        if self.next_level().is_none() {
            warn!("Level {} was the last level in the catalogue", level);
        }
        true
    }

    // =========================================================================
    // Render State
    // =========================================================================

    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            level: self.level.unwrap_or(0),
            frame: self.frame,
            platforms: self.platforms.iter().map(Platform::render).collect(),
            enemies: self.enemies.iter().map(Enemy::render).collect(),
            coins: self.coins.iter().map(Coin::render).collect(),
            powerups: self.powerups.iter().map(Powerup::render).collect(),
            boss: self.boss.as_ref().map(Boss::render),
            projectiles: self
                .boss
                .as_ref()
                .map(Boss::render_projectiles)
                .unwrap_or_default(),
        }
    }
}
