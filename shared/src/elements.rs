//! Element definitions shared by bosses and their projectiles.

use serde::{Deserialize, Serialize};

/// Color used for anything that has no element mapping
pub const DEFAULT_ELEMENT_COLOR: &str = "#ffffff";

/// Element of a boss. Purely cosmetic: picks projectile color and particle tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ElementTag {
    Fire = 0,
    Ice = 1,
    Lightning = 2,
    Nature = 3,
    Shadow = 4,
    Metal = 5,
}

impl ElementTag {
    /// Rotation used by the boss generator, one element per boss level
    pub const ORDER: [ElementTag; 6] = [
        Self::Fire,
        Self::Ice,
        Self::Lightning,
        Self::Nature,
        Self::Shadow,
        Self::Metal,
    ];

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Parse an element from its upper-case name ("FIRE", "ICE", ...)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|e| e.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "FIRE",
            Self::Ice => "ICE",
            Self::Lightning => "LIGHTNING",
            Self::Nature => "NATURE",
            Self::Shadow => "SHADOW",
            Self::Metal => "METAL",
        }
    }

    /// Hex color used for the boss body and its projectiles
    pub fn color(&self) -> &'static str {
        match self {
            Self::Fire => "#ff4400",
            Self::Ice => "#00ffff",
            Self::Lightning => "#ffff00",
            Self::Nature => "#00ff00",
            Self::Shadow => "#660066",
            Self::Metal => "#cccccc",
        }
    }

    /// Tag handed to the particle system for projectile trails
    pub fn particle_tag(&self) -> &'static str {
        self.name()
    }
}

/// Color lookup for a raw element name, falling back to white for unknown names
pub fn element_color_by_name(name: &str) -> &'static str {
    match ElementTag::from_name(name) {
        Some(element) => element.color(),
        None => DEFAULT_ELEMENT_COLOR,
    }
}
