use crate::abilities::{Ability, AbilityScores};
use crate::error::DomainError;
use crate::score_table::{MANUAL_MAX_SCORE, MANUAL_MIN_SCORE};

/// Manual entry: any base in 1..=30 is accepted as typed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualEntry;

impl ManualEntry {
    pub fn set_base(
        abilities: &mut AbilityScores,
        ability: Ability,
        value: i32,
    ) -> Result<(), DomainError> {
        if !(MANUAL_MIN_SCORE..=MANUAL_MAX_SCORE).contains(&value) {
            return Err(DomainError::validation(format!(
                "{} must be between {} and {}, got {}",
                ability, MANUAL_MIN_SCORE, MANUAL_MAX_SCORE, value
            )));
        }
        abilities.get_mut(ability).edit_base(value);
        Ok(())
    }
}
