//! Static reference data for ability score generation.
//!
//! Standard array values, the point-buy cost curve, ability names and
//! descriptions, and the per-species ability bonus table. No logic beyond
//! lookups lives here.

use crate::abilities::Ability;

/// The six fixed values of the standard array, in display order.
pub const STANDARD_ARRAY_VALUES: [i32; 6] = [15, 14, 13, 12, 10, 8];

/// Base assigned to an ability that has no standard-array value.
pub const UNASSIGNED_BASE: i32 = 8;

/// Base every ability starts at on a fresh character.
pub const DEFAULT_BASE: i32 = 10;

/// Point buy: floor score, free of cost.
pub const POINT_BUY_BASE_SCORE: i32 = 8;

/// Point buy: highest purchasable score.
pub const POINT_BUY_MAX_SCORE: i32 = 15;

/// Point buy: budget shared by all six abilities.
pub const POINT_BUY_TOTAL_POINTS: i32 = 27;

/// Cumulative point cost for each purchasable score.
const POINT_BUY_COSTS: [(i32, i32); 8] = [
    (8, 0),
    (9, 1),
    (10, 2),
    (11, 3),
    (12, 4),
    (13, 5),
    (14, 7),
    (15, 9),
];

/// Manual entry: lowest base that may be typed in.
pub const MANUAL_MIN_SCORE: i32 = 1;

/// Manual entry: highest base that may be typed in.
pub const MANUAL_MAX_SCORE: i32 = 30;

/// Points an ability score improvement grants.
pub const IMPROVEMENT_POINTS: u8 = 2;

/// Most an improvement may raise a single ability.
pub const IMPROVEMENT_MAX_PER_ABILITY: u8 = 2;

/// Ceiling for a score raised by an improvement.
pub const IMPROVEMENT_SCORE_CAP: i32 = 20;

/// Cumulative cost of a point-buy score, `None` outside 8..=15.
pub fn point_buy_cost(score: i32) -> Option<i32> {
    POINT_BUY_COSTS
        .iter()
        .find(|(value, _)| *value == score)
        .map(|(_, cost)| *cost)
}

/// Full ability name (e.g. "Strength").
pub fn ability_name(ability: Ability) -> &'static str {
    match ability {
        Ability::Str => "Strength",
        Ability::Dex => "Dexterity",
        Ability::Con => "Constitution",
        Ability::Int => "Intelligence",
        Ability::Wis => "Wisdom",
        Ability::Cha => "Charisma",
    }
}

/// One-line flavour text for an ability.
pub fn ability_description(ability: Ability) -> &'static str {
    match ability {
        Ability::Str => "Physical power, muscle, and endurance",
        Ability::Dex => "Agility, reflexes, and balance",
        Ability::Con => "Health, stamina, and vitality",
        Ability::Int => "Reasoning ability, memory, and analytical skill",
        Ability::Wis => "Awareness, intuition, and insight",
        Ability::Cha => "Force of personality, leadership, and confidence",
    }
}

const ALL_PLUS_ONE: &[(Ability, i32)] = &[
    (Ability::Str, 1),
    (Ability::Dex, 1),
    (Ability::Con, 1),
    (Ability::Int, 1),
    (Ability::Wis, 1),
    (Ability::Cha, 1),
];

/// Species ability bonuses, keyed by lowercase species name.
const RACIAL_BONUSES: &[(&str, &[(Ability, i32)])] = &[
    ("dwarf", &[(Ability::Con, 2)]),
    ("elf", &[(Ability::Dex, 2)]),
    ("halfling", &[(Ability::Dex, 2)]),
    ("human", ALL_PLUS_ONE),
    ("dragonborn", &[(Ability::Str, 2), (Ability::Cha, 1)]),
    ("gnome", &[(Ability::Int, 2)]),
    ("half-elf", &[(Ability::Cha, 2)]),
    ("half-orc", &[(Ability::Str, 2), (Ability::Con, 1)]),
    ("tiefling", &[(Ability::Cha, 2), (Ability::Int, 1)]),
];

/// Table bonus a species grants to an ability. Unknown species give 0.
pub fn species_table_bonus(species_name: &str, ability: Ability) -> i32 {
    let key = species_name.trim().to_lowercase();
    RACIAL_BONUSES
        .iter()
        .find(|(name, _)| *name == key)
        .and_then(|(_, bonuses)| bonuses.iter().find(|(a, _)| *a == ability))
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_table_matches_curve() {
        let costs: Vec<i32> = (8..=15).filter_map(point_buy_cost).collect();
        assert_eq!(costs, vec![0, 1, 2, 3, 4, 5, 7, 9]);
    }

    #[test]
    fn cost_outside_range_is_none() {
        assert_eq!(point_buy_cost(7), None);
        assert_eq!(point_buy_cost(16), None);
    }

    #[test]
    fn species_lookup_ignores_case_and_whitespace() {
        assert_eq!(species_table_bonus("  Half-Orc ", Ability::Str), 2);
        assert_eq!(species_table_bonus("HUMAN", Ability::Wis), 1);
        assert_eq!(species_table_bonus("Elf", Ability::Str), 0);
    }

    #[test]
    fn unknown_species_has_no_bonus() {
        for ability in Ability::ALL {
            assert_eq!(species_table_bonus("Warforged", ability), 0);
        }
    }

    #[test]
    fn every_ability_has_name_and_description() {
        for ability in Ability::ALL {
            assert!(!ability_name(ability).is_empty());
            assert!(!ability_description(ability).is_empty());
        }
    }
}
