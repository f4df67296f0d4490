//! Static boss catalogue: five boss variants per element, three abilities each.

use crate::ElementTag;

/// Number of boss variants per element
pub const VARIANTS_PER_ELEMENT: usize = 5;

/// One boss variant and its fixed ability list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossTypeDef {
    pub name: &'static str,
    pub abilities: [&'static str; 3],
}

/// All variants of a single element
#[derive(Debug, Clone, Copy)]
pub struct ElementBosses {
    pub element: ElementTag,
    pub types: [BossTypeDef; VARIANTS_PER_ELEMENT],
}

const fn def(name: &'static str, abilities: [&'static str; 3]) -> BossTypeDef {
    BossTypeDef { name, abilities }
}

// =============================================================================
// Catalogue
// =============================================================================

/// Indexed in `ElementTag::ORDER` order
pub static BOSS_CATALOGUE: [ElementBosses; 6] = [
    ElementBosses {
        element: ElementTag::Fire,
        types: [
            def("Phoenix", ["Rebirth Flames", "Fire Storm", "Wing Blast"]),
            def("Dragon", ["Fire Breath", "Meteor Shower", "Tail Swipe"]),
            def("Ifrit", ["Hellfire", "Magma Wave", "Inferno Punch"]),
            def("Volcano", ["Lava Eruption", "Ash Cloud", "Rock Throw"]),
            def("Flame Knight", ["Flame Sword", "Fire Shield", "Burning Dash"]),
        ],
    },
    ElementBosses {
        element: ElementTag::Ice,
        types: [
            def("Frost Giant", ["Ice Stomp", "Blizzard", "Frozen Spikes"]),
            def("Ice Queen", ["Ice Storm", "Freeze Ray", "Crystal Shards"]),
            def("Glacier", ["Avalanche", "Ice Wall", "Frost Nova"]),
            def("Snow Beast", ["Ice Breath", "Snow Storm", "Frozen Claws"]),
            def("Frozen Knight", ["Ice Blade", "Frost Shield", "Ice Dash"]),
        ],
    },
    ElementBosses {
        element: ElementTag::Lightning,
        types: [
            def("Thunder God", ["Lightning Strike", "Thunder Clap", "Electric Field"]),
            def("Storm Drake", ["Storm Breath", "Lightning Chain", "Thunder Wing"]),
            def("Lightning Lord", ["Thunder Bolt", "Electric Storm", "Shock Wave"]),
            def("Tempest", ["Tornado", "Lightning Rain", "Wind Slash"]),
            def("Thunder Knight", ["Lightning Sword", "Thunder Shield", "Electric Dash"]),
        ],
    },
    ElementBosses {
        element: ElementTag::Nature,
        types: [
            def("Ancient Tree", ["Root Strike", "Leaf Storm", "Nature's Wrath"]),
            def("Forest Guardian", ["Thorn Spray", "Healing Aura", "Forest Call"]),
            def("Vine Lord", ["Vine Whip", "Poison Cloud", "Root Trap"]),
            def("Earth Golem", ["Rock Throw", "Ground Pound", "Earth Shield"]),
            def("Nature Knight", ["Vine Sword", "Nature Shield", "Forest Dash"]),
        ],
    },
    ElementBosses {
        element: ElementTag::Shadow,
        types: [
            def("Dark Lord", ["Shadow Ball", "Dark Void", "Night Terror"]),
            def("Shadow Beast", ["Shadow Claw", "Dark Mist", "Void Strike"]),
            def("Void Walker", ["Teleport Strike", "Shadow Clone", "Dark Portal"]),
            def("Nightmare", ["Fear Aura", "Dream Eater", "Shadow Form"]),
            def("Shadow Knight", ["Dark Sword", "Shadow Shield", "Void Dash"]),
        ],
    },
    ElementBosses {
        element: ElementTag::Metal,
        types: [
            def("Steel Golem", ["Metal Crush", "Gear Storm", "Steel Defense"]),
            def("Mech Lord", ["Missile Barrage", "Laser Beam", "Rocket Punch"]),
            def("Iron Giant", ["Steel Slam", "Metal Storm", "Iron Shield"]),
            def("Machine King", ["Circuit Overload", "System Crash", "Program Delete"]),
            def("Metal Knight", ["Steel Sword", "Metal Shield", "Mech Dash"]),
        ],
    },
];

// =============================================================================
// Lookups
// =============================================================================

/// Variants for an element, in generator order
pub fn boss_types(element: ElementTag) -> &'static [BossTypeDef; VARIANTS_PER_ELEMENT] {
    &BOSS_CATALOGUE[element.as_u8() as usize].types
}

/// Variant `index` of an element; the index wraps around the five variants
pub fn boss_type_def(element: ElementTag, index: usize) -> &'static BossTypeDef {
    &boss_types(element)[index % VARIANTS_PER_ELEMENT]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_follows_element_order() {
        for (entry, element) in BOSS_CATALOGUE.iter().zip(ElementTag::ORDER) {
            assert_eq!(entry.element, element);
        }
    }

    #[test]
    fn test_multi_word_types_have_abilities() {
        let knight = boss_type_def(ElementTag::Fire, 4);
        assert_eq!(knight.name, "Flame Knight");
        assert_eq!(knight.abilities, ["Flame Sword", "Fire Shield", "Burning Dash"]);
    }

    #[test]
    fn test_variant_index_wraps() {
        assert_eq!(boss_type_def(ElementTag::Ice, 6).name, "Ice Queen");
    }
}
