//! Headless run driver.
//!
//! Plays through the level catalogue with a scripted player at a fixed tick
//! rate, saving progress periodically.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ascent_engine::collision::{Rect, Vec2};
use ascent_engine::level::AttackReport;
use ascent_engine::persistence::{self, PersistenceHandle};
use ascent_engine::{
    EngineConfig, GameProgress, LevelCatalogue, LevelManager, LogCollaborators, PlayerView,
    SystemClock,
};
use ascent_shared::PowerupKind;

/// Scripted player movement per frame
const PLAYER_SPEED: f32 = 5.0;

/// Frames between player attacks
const ATTACK_INTERVAL: u64 = 20;
const ATTACK_DAMAGE: f32 = 10.0;
const ATTACK_REACH: f32 = 96.0;

const ENEMY_POINTS: u32 = 100;
const BOSS_POINTS: u32 = 1000;
const HEALTH_POWERUP: f32 = 50.0;

/// Walk toward the nearest enemy, or the boss once the enemies are gone
fn next_target(levels: &LevelManager, player: Vec2) -> Option<Vec2> {
    let nearest_enemy = levels
        .enemies()
        .iter()
        .map(|e| e.bounds.center())
        .min_by(|a, b| player.distance_to(*a).total_cmp(&player.distance_to(*b)));
    nearest_enemy.or_else(|| levels.boss().map(|b| b.position()))
}

fn step_player(player: &mut PlayerView, levels: &LevelManager) {
    if let Some(target) = next_target(levels, player.position) {
        let offset = target - player.position;
        let distance = offset.length();
        if distance > 1.0 {
            player.position = player.position + offset.normalized() * distance.min(PLAYER_SPEED);
        }
    }
}

fn score_attack(progress: &mut GameProgress, attack: &AttackReport) {
    for _ in 0..attack.enemies_defeated {
        progress.score.add_score(ENEMY_POINTS);
    }
    if attack.boss_defeated {
        progress.score.add_score(BOSS_POINTS);
    }
}

async fn load_progress(persistence: Option<&PersistenceHandle>, start_level: u32) -> GameProgress {
    match persistence {
        Some(handle) => match handle.load().await {
            Some(record) => {
                info!(
                    "Loaded progress: high score {}, {} levels unlocked",
                    record.high_score, record.unlocked_levels
                );
                GameProgress::from_record(start_level, record)
            }
            None => GameProgress::new(start_level),
        },
        None => GameProgress::new(start_level),
    }
}

#[tokio::main]
async fn main() {
    let config = match EngineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            EngineConfig::default()
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter)).init();

    info!("Starting Ascent headless run...");
    info!("Tick rate: {} Hz, start level {}", config.tick_rate, config.start_level);

    let persistence = match persistence::init(&config.progress_path) {
        Ok(handle) => Some(handle),
        Err(e) => {
            error!("Failed to initialize persistence: {}", e);
            error!("Running without saved progress");
            None
        }
    };

    let mut progress = load_progress(persistence.as_ref(), config.start_level).await;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let catalogue = match LevelCatalogue::generate(&mut rng) {
        Ok(catalogue) => catalogue,
        Err(e) => {
            error!("Failed to generate levels: {}", e);
            return;
        }
    };
    let clock = Arc::new(SystemClock::new());
    let mut levels = LevelManager::new(catalogue, clock);
    if let Some(seed) = config.seed {
        levels = levels.with_boss_seed(seed);
    }

    if let Err(e) = levels.load_level(config.start_level) {
        error!("Cannot start at level {}: {}", config.start_level, e);
        return;
    }
    progress.current_level = config.start_level;

    let mut collaborators = LogCollaborators::default();
    let mut player = PlayerView::new(100.0, 100.0);

    let tick_duration = Duration::from_secs_f64(1.0 / config.tick_rate as f64);
    let save_interval = Duration::from_secs(config.save_interval_secs);
    let mut last_save = Instant::now();
    let mut frame: u64 = 0;

    info!("Run started");

    // Main loop
    while frame < config.max_frames {
        let tick_start = Instant::now();

        step_player(&mut player, &levels);
        let report = levels.update(&player, &mut collaborators);
        progress.score.update();

        if report.coins > 0 {
            progress.player_stats.coins += report.coins;
            progress.score.add_score(report.coins);
        }
        for kind in &report.powerups {
            match kind {
                PowerupKind::Health => progress.player_stats.heal(HEALTH_POWERUP),
                other => debug!("Picked up {} powerup", other.name()),
            }
        }
        if report.player_damage > 0.0 && progress.player_stats.take_damage(report.player_damage) {
            warn!("Player lost a life ({} left)", progress.player_stats.lives);
            if progress.player_stats.is_out_of_lives() {
                info!("Game over at level {}", progress.current_level);
                break;
            }
        }

        let mut complete = report.level_complete;
        if !complete && frame % ATTACK_INTERVAL == 0 {
            let reach = Rect::centered(player.position, ATTACK_REACH, ATTACK_REACH);
            let attack = levels.attack(&reach, ATTACK_DAMAGE, &mut collaborators);
            score_attack(&mut progress, &attack);
            complete = levels.is_complete();
        }

        if complete {
            match levels.next_level() {
                Some(next) => {
                    progress.unlock_level(next);
                    if let Some(ref handle) = persistence {
                        handle.save(progress.record());
                    }
                    if let Err(e) = levels.load_level(next) {
                        error!("Failed to load level {}: {}", next, e);
                        break;
                    }
                    progress.current_level = next;
                }
                None => {
                    info!("All {} levels cleared", levels.catalogue().len());
                    break;
                }
            }
        }

        if frame % config.tick_rate as u64 == 0 {
            match levels.render_snapshot().serialize() {
                Ok(bytes) => debug!("Frame {}: snapshot {} bytes", frame, bytes.len()),
                Err(e) => warn!("Failed to encode snapshot: {}", e),
            }
        }

        // Periodic save
        if last_save.elapsed() >= save_interval {
            if let Some(ref handle) = persistence {
                handle.save(progress.record());
                debug!("Periodic save queued");
            }
            last_save = Instant::now();
        }

        frame += 1;

        // Sleep until next tick
        let elapsed = tick_start.elapsed();
        if elapsed < tick_duration {
            tokio::time::sleep(tick_duration - elapsed).await;
        }
    }

    info!(
        "Run finished after {} frames: level {}, score {}, high score {}, {} effects emitted",
        frame,
        progress.current_level,
        progress.score.score,
        progress.score.high_score,
        collaborators.effects_emitted
    );

    levels.unload();
    if let Some(handle) = persistence {
        handle.save(progress.record());
        if let Err(e) = handle.shutdown().await {
            warn!("Persistence shutdown failed: {}", e);
        }
    }
}
