//! Boss projectiles.

use ascent_shared::{ElementTag, ProjectileRender, ARENA_HEIGHT, ARENA_WIDTH};

use crate::collision::{Rect, Vec2};

/// Draw and hit radius of a projectile
pub const PROJECTILE_RADIUS: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub damage: f32,
    pub element: ElementTag,
    pub active: bool,
}

impl Projectile {
    /// Launch from `origin` at `angle` radians
    pub fn at_angle(origin: Vec2, angle: f32, speed: f32, damage: f32, element: ElementTag) -> Self {
        let velocity = Vec2::from_angle(angle) * speed;
        Self {
            x: origin.x,
            y: origin.y,
            velocity_x: velocity.x,
            velocity_y: velocity.y,
            damage,
            element,
            active: true,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn speed(&self) -> f32 {
        Vec2::new(self.velocity_x, self.velocity_y).length()
    }

    /// Advance one frame
    pub fn update(&mut self) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
    }

    /// Inside the arena rectangle, edges included
    pub fn in_arena(&self) -> bool {
        (0.0..=ARENA_WIDTH).contains(&self.x) && (0.0..=ARENA_HEIGHT).contains(&self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.position(), PROJECTILE_RADIUS * 2.0, PROJECTILE_RADIUS * 2.0)
    }

    pub fn render(&self) -> ProjectileRender {
        ProjectileRender {
            x: self.x,
            y: self.y,
            radius: PROJECTILE_RADIUS,
            color: self.element.color().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aimed_projectile_moves_toward_target() {
        let origin = Vec2::new(100.0, 100.0);
        let angle = origin.angle_to(Vec2::new(200.0, 100.0));
        let mut p = Projectile::at_angle(origin, angle, 5.0, 10.0, ElementTag::Fire);
        assert!((p.velocity_x - 5.0).abs() < 0.0001);
        assert!(p.velocity_y.abs() < 0.0001);

        p.update();
        assert!((p.x - 105.0).abs() < 0.0001);
        assert!((p.speed() - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_arena_bounds_are_inclusive() {
        let mut p = Projectile::at_angle(Vec2::new(800.0, 600.0), 0.0, 1.0, 1.0, ElementTag::Ice);
        assert!(p.in_arena());
        p.update();
        assert!(!p.in_arena());
    }
}
