//! Live level entities built from generated specs.

use ascent_shared::{
    CoinSpec, EnemyKind, EnemySpec, PlatformKind, PlatformSpec, PowerupKind, PowerupSpec,
    RectRender,
};

use crate::collision::{Rect, Vec2};

/// Enemies only chase a player closer than this
const AGGRO_RANGE: f32 = 200.0;

/// Frames between contact hits from the same enemy
const CONTACT_COOLDOWN: u32 = 60;

const ENEMY_SIZE: f32 = 32.0;
const COIN_SIZE: f32 = 16.0;
const POWERUP_SIZE: f32 = 20.0;

/// Vertical bob of an uncollected powerup
const FLOAT_AMPLITUDE: f32 = 5.0;
const FLOAT_SPEED: f32 = 0.05;

const PLATFORM_COLOR: &str = "#8b4513";
const ENEMY_COLOR: &str = "#ff0000";
const COIN_COLOR: &str = "#ffd700";

#[derive(Debug, Clone)]
pub struct Platform {
    pub bounds: Rect,
    pub kind: PlatformKind,
    origin_x: f32,
    speed: f32,
    distance: f32,
    direction: f32,
}

impl Platform {
    pub fn from_spec(spec: &PlatformSpec) -> Self {
        Self {
            bounds: Rect::new(spec.x, spec.y, spec.width, spec.height),
            kind: spec.kind,
            origin_x: spec.x,
            speed: spec.speed,
            distance: spec.distance,
            direction: 1.0,
        }
    }

    /// Moving platforms patrol between their origin and `distance` to the right
    pub fn update(&mut self) {
        if self.kind != PlatformKind::Moving || self.speed <= 0.0 || self.distance <= 0.0 {
            return;
        }
        self.bounds.x += self.speed * self.direction;
        let far = self.origin_x + self.distance;
        if self.bounds.x >= far {
            self.bounds.x = far;
            self.direction = -1.0;
        } else if self.bounds.x <= self.origin_x {
            self.bounds.x = self.origin_x;
            self.direction = 1.0;
        }
    }

    pub fn render(&self) -> RectRender {
        rect_render(&self.bounds, PLATFORM_COLOR)
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u64,
    pub kind: EnemyKind,
    pub bounds: Rect,
    pub health: f32,
    pub max_health: f32,
    pub damage: f32,
    pub speed: f32,
    contact_cooldown: u32,
}

impl Enemy {
    pub fn from_spec(id: u64, spec: &EnemySpec) -> Self {
        Self {
            id,
            kind: spec.kind,
            bounds: Rect::new(spec.x, spec.y, ENEMY_SIZE, ENEMY_SIZE),
            health: spec.health,
            max_health: spec.health,
            damage: spec.damage,
            speed: spec.speed,
            contact_cooldown: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Chase the player horizontally while in aggro range.
    /// Returns contact damage dealt to the player this frame.
    pub fn update(&mut self, player: &Rect) -> Option<f32> {
        self.contact_cooldown = self.contact_cooldown.saturating_sub(1);
        if !self.is_alive() {
            return None;
        }

        let target = player.center();
        let center = self.bounds.center();
        if center.distance_to(target) <= AGGRO_RANGE {
            let dx = target.x - center.x;
            self.bounds.x += dx.signum() * dx.abs().min(self.speed);
        }

        if self.contact_cooldown == 0 && self.bounds.intersects(player) {
            self.contact_cooldown = CONTACT_COOLDOWN;
            return Some(self.damage);
        }
        None
    }

    /// Returns true if this hit killed the enemy
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        !self.is_alive()
    }

    pub fn render(&self) -> RectRender {
        rect_render(&self.bounds, ENEMY_COLOR)
    }
}

#[derive(Debug, Clone)]
pub struct Coin {
    pub bounds: Rect,
    pub value: u32,
    pub collected: bool,
}

impl Coin {
    pub fn from_spec(spec: &CoinSpec) -> Self {
        Self {
            bounds: Rect::new(spec.x, spec.y, COIN_SIZE, COIN_SIZE),
            value: spec.value,
            collected: false,
        }
    }

    pub fn render(&self) -> RectRender {
        rect_render(&self.bounds, COIN_COLOR)
    }
}

#[derive(Debug, Clone)]
pub struct Powerup {
    pub position: Vec2,
    pub kind: PowerupKind,
    pub duration_ms: u32,
    pub float_offset: f32,
    pub active: bool,
}

impl Powerup {
    pub fn from_spec(spec: &PowerupSpec) -> Self {
        Self {
            position: Vec2::new(spec.x, spec.y),
            kind: spec.kind,
            duration_ms: spec.duration_ms,
            float_offset: 0.0,
            active: true,
        }
    }

    pub fn update(&mut self, frame: u64) {
        self.float_offset = (frame as f32 * FLOAT_SPEED).sin() * FLOAT_AMPLITUDE;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y + self.float_offset,
            POWERUP_SIZE,
            POWERUP_SIZE,
        )
    }

    pub fn render(&self) -> RectRender {
        rect_render(&self.bounds(), self.kind.color())
    }
}

fn rect_render(rect: &Rect, color: &str) -> RectRender {
    RectRender {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        color: color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::from_spec(
            1,
            &EnemySpec {
                x,
                y,
                kind: EnemyKind::Slime,
                health: 25.0,
                damage: 6.0,
                speed: 1.2,
            },
        )
    }

    #[test]
    fn test_moving_platform_patrols() {
        let mut platform = Platform::from_spec(&PlatformSpec {
            x: 100.0,
            y: 200.0,
            width: 80.0,
            height: 20.0,
            kind: PlatformKind::Moving,
            speed: 2.0,
            distance: 10.0,
        });

        for _ in 0..5 {
            platform.update();
        }
        assert_eq!(platform.bounds.x, 110.0);

        platform.update();
        assert_eq!(platform.bounds.x, 108.0);

        for _ in 0..100 {
            platform.update();
            assert!((100.0..=110.0).contains(&platform.bounds.x));
        }
    }

    #[test]
    fn test_static_platform_stays_put() {
        let mut platform = Platform::from_spec(&PlatformSpec {
            x: 100.0,
            y: 200.0,
            width: 80.0,
            height: 20.0,
            kind: PlatformKind::Static,
            speed: 1.5,
            distance: 50.0,
        });
        platform.update();
        assert_eq!(platform.bounds.x, 100.0);
    }

    #[test]
    fn test_enemy_chases_only_in_range() {
        let mut enemy = enemy_at(100.0, 100.0);
        let far = Rect::new(600.0, 100.0, 32.0, 48.0);
        enemy.update(&far);
        assert_eq!(enemy.bounds.x, 100.0);

        let near = Rect::new(250.0, 100.0, 32.0, 48.0);
        enemy.update(&near);
        assert!((enemy.bounds.x - 101.2).abs() < 0.001);
        assert_eq!(enemy.bounds.y, 100.0);
    }

    #[test]
    fn test_enemy_contact_damage_has_cooldown() {
        let mut enemy = enemy_at(100.0, 100.0);
        let player = Rect::new(100.0, 100.0, 32.0, 48.0);

        assert_eq!(enemy.update(&player), Some(6.0));
        for _ in 0..CONTACT_COOLDOWN - 1 {
            assert_eq!(enemy.update(&player), None);
        }
        assert_eq!(enemy.update(&player), Some(6.0));
    }

    #[test]
    fn test_enemy_dies_once() {
        let mut enemy = enemy_at(0.0, 0.0);
        assert!(!enemy.take_damage(10.0));
        assert!(enemy.take_damage(100.0));
        assert_eq!(enemy.health, 0.0);
        assert!(!enemy.take_damage(100.0));
    }

    #[test]
    fn test_powerup_floats() {
        let mut powerup = Powerup::from_spec(&PowerupSpec {
            x: 50.0,
            y: 50.0,
            kind: PowerupKind::Jump,
            duration_ms: 10_000,
        });
        for frame in 0..200 {
            powerup.update(frame);
            assert!(powerup.float_offset.abs() <= FLOAT_AMPLITUDE);
        }
        assert_eq!(powerup.render().color, "#ffffff");
    }
}
