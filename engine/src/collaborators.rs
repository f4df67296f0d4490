//! Outbound interfaces to the systems surrounding the encounter.
//!
//! The simulation never calls these directly; it produces `GameEvent`s and
//! the level manager dispatches them here once per frame.

use log::{debug, info};

use ascent_shared::ElementTag;

use crate::boss::Boss;

/// Particle and visual effects. Fire-and-forget.
pub trait Effects {
    fn emit(&mut self, tag: &str, x: f32, y: f32, scale: Option<f32>, element: Option<ElementTag>);
}

/// On-screen boss health display
pub trait Hud {
    /// `ratio` is in [0, 1]; called after every successful hit
    fn update_boss_health(&mut self, ratio: f32);
}

/// Run progression: rewards and level completion
pub trait Progression {
    fn on_boss_defeated(&mut self, boss: &Boss);
    fn spawn_powerup(&mut self, x: f32, y: f32);
    fn on_level_complete(&mut self, level: u32);
}

/// Everything the level manager dispatches to
pub trait Collaborators: Effects + Hud + Progression {}

impl<T: Effects + Hud + Progression> Collaborators for T {}

/// Collaborators that only write to the log. Used by the headless runner.
#[derive(Debug, Default)]
pub struct LogCollaborators {
    pub effects_emitted: u64,
    pub bosses_defeated: u32,
    pub levels_completed: Vec<u32>,
}

impl Effects for LogCollaborators {
    fn emit(&mut self, tag: &str, x: f32, y: f32, scale: Option<f32>, _element: Option<ElementTag>) {
        self.effects_emitted += 1;
        // Trails are tagged with the element name and fire every frame
        if tag != "trail" && ElementTag::from_name(tag).is_none() {
            debug!("Effect {} at ({:.0}, {:.0}) scale {:?}", tag, x, y, scale);
        }
    }
}

impl Hud for LogCollaborators {
    fn update_boss_health(&mut self, ratio: f32) {
        debug!("Boss health {:.0}%", ratio * 100.0);
    }
}

impl Progression for LogCollaborators {
    fn on_boss_defeated(&mut self, boss: &Boss) {
        self.bosses_defeated += 1;
        info!("Boss defeated: {} ({})", boss.boss_type(), boss.element().name());
    }

    fn spawn_powerup(&mut self, x: f32, y: f32) {
        debug!("Reward dropped at ({:.0}, {:.0})", x, y);
    }

    fn on_level_complete(&mut self, level: u32) {
        self.levels_completed.push(level);
        info!("Level {} complete", level);
    }
}
