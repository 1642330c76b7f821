//! Pure derivation of bonuses, totals and modifiers.

use super::{Ability, AbilityScores};
use crate::score_table::species_table_bonus;
use crate::species::Species;

/// Ability modifier for a total score: `floor((total - 10) / 2)`.
pub fn modifier_of(total: i32) -> i32 {
    total.saturating_sub(10).div_euclid(2)
}

/// Render a modifier with an explicit plus sign for non-negative values.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{}", modifier)
    } else {
        modifier.to_string()
    }
}

/// Species table bonus plus any subspecies bonus for `ability`.
pub fn racial_bonus_of(species: Option<&Species>, ability: Ability) -> i32 {
    match species {
        Some(species) => {
            species_table_bonus(species.name(), ability) + species.subspecies_bonus(ability)
        }
        None => 0,
    }
}

/// Recompute every bonus and total against `species`. Bases and touched
/// flags are carried over unchanged.
pub fn recompute_all(abilities: &AbilityScores, species: Option<&Species>) -> AbilityScores {
    let mut updated = *abilities;
    for ability in Ability::ALL {
        updated
            .get_mut(ability)
            .set_bonus(racial_bonus_of(species, ability));
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_uses_floor_division() {
        assert_eq!(modifier_of(15), 2);
        assert_eq!(modifier_of(10), 0);
        assert_eq!(modifier_of(11), 0);
        assert_eq!(modifier_of(8), -1);
        assert_eq!(modifier_of(9), -1);
        assert_eq!(modifier_of(1), -5);
        assert_eq!(modifier_of(20), 5);
    }

    #[test]
    fn format_modifier_signs() {
        assert_eq!(format_modifier(0), "+0");
        assert_eq!(format_modifier(3), "+3");
        assert_eq!(format_modifier(-1), "-1");
    }

    #[test]
    fn half_orc_bonuses() {
        let half_orc = Species::new("Half-Orc");
        assert_eq!(racial_bonus_of(Some(&half_orc), Ability::Str), 2);
        assert_eq!(racial_bonus_of(Some(&half_orc), Ability::Con), 1);
        assert_eq!(racial_bonus_of(Some(&half_orc), Ability::Dex), 0);
    }

    #[test]
    fn subspecies_bonus_stacks() {
        let species = Species::new("Half-Orc").with_subspecies_bonus(Ability::Str, 1);
        assert_eq!(racial_bonus_of(Some(&species), Ability::Str), 3);
    }

    #[test]
    fn unknown_species_keeps_subspecies_part() {
        let species = Species::new("Warforged").with_subspecies_bonus(Ability::Con, 1);
        assert_eq!(racial_bonus_of(Some(&species), Ability::Con), 1);
        assert_eq!(racial_bonus_of(Some(&species), Ability::Str), 0);
        assert_eq!(racial_bonus_of(None, Ability::Str), 0);
    }

    #[test]
    fn recompute_sets_totals_and_keeps_bases() {
        let mut abilities = AbilityScores::from_bases([15, 14, 13, 12, 10, 8]);
        abilities.get_mut(Ability::Dex).mark_touched();
        let human = Species::new("Human");

        let updated = recompute_all(&abilities, Some(&human));

        for (ability, score) in updated.iter() {
            assert_eq!(score.base(), abilities.get(ability).base());
            assert_eq!(score.bonus(), 1);
            assert_eq!(score.total(), score.base() + 1);
        }
        assert!(updated.get(Ability::Dex).is_touched());
        assert!(!updated.get(Ability::Str).is_touched());
    }

    #[test]
    fn recompute_is_idempotent() {
        let abilities = AbilityScores::from_bases([8, 10, 12, 14, 15, 9]);
        let tiefling = Species::new("Tiefling").with_subspecies_bonus(Ability::Wis, 1);

        let once = recompute_all(&abilities, Some(&tiefling));
        let twice = recompute_all(&once, Some(&tiefling));
        assert_eq!(once, twice);
    }

    #[test]
    fn clearing_species_drops_bonuses() {
        let abilities = AbilityScores::from_bases([10; 6]);
        let dwarf = Species::new("Dwarf");
        let with_bonus = recompute_all(&abilities, Some(&dwarf));
        assert_eq!(with_bonus.get(Ability::Con).total(), 12);

        let cleared = recompute_all(&with_bonus, None);
        assert_eq!(cleared.get(Ability::Con).total(), 10);
        assert_eq!(cleared.get(Ability::Con).bonus(), 0);
    }
}
