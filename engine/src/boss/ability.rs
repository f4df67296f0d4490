//! Per-boss ability state, resolved once from the registry.

use ascent_shared::resolve_ability;

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityState {
    pub name: String,
    pub damage: f32,
    /// Frames until the ability can be used again
    pub cooldown_remaining: u32,
    pub max_cooldown: u32,
    /// Frames the ability stays active once used
    pub duration: u32,
    pub active_remaining: u32,
    pub is_active: bool,
}

impl AbilityState {
    /// Look the ability up in the registry. Unknown names get base stats.
    pub fn resolve(name: &str) -> Self {
        let stats = resolve_ability(name);
        Self {
            name: name.to_string(),
            damage: stats.damage,
            cooldown_remaining: 0,
            max_cooldown: stats.cooldown,
            duration: stats.duration,
            active_remaining: 0,
            is_active: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
        if self.is_active {
            self.active_remaining = self.active_remaining.saturating_sub(1);
            if self.active_remaining == 0 {
                self.is_active = false;
            }
        }
    }

    /// Start the ability if it is off cooldown
    pub fn try_activate(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.cooldown_remaining = self.max_cooldown;
        self.active_remaining = self.duration;
        self.is_active = self.duration > 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activation_respects_cooldown() {
        let mut ability = AbilityState::resolve("Wing Blast");
        assert_eq!(ability.max_cooldown, 90);
        assert_eq!(ability.duration, 30);

        assert!(ability.try_activate());
        assert!(ability.is_active);
        assert!(!ability.try_activate());

        for _ in 0..30 {
            ability.tick();
        }
        assert!(!ability.is_active);
        assert_eq!(ability.cooldown_remaining, 60);

        for _ in 0..60 {
            ability.tick();
        }
        assert!(ability.try_activate());
    }
}
