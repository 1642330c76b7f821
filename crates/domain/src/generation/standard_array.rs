use std::collections::BTreeMap;

use super::AllocationError;
use crate::abilities::{Ability, AbilityScores};
use crate::score_table::{STANDARD_ARRAY_VALUES, UNASSIGNED_BASE};

/// Standard array assignments. Each value goes to at most one ability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardArray {
    assigned: BTreeMap<Ability, i32>,
}

impl StandardArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild assignments from existing bases.
    ///
    /// A base counts as assigned when it is a standard value other than 8.
    /// When two abilities share a value, the first in sheet order keeps it.
    pub fn from_abilities(abilities: &AbilityScores) -> Self {
        let mut array = Self::new();
        for (ability, score) in abilities.iter() {
            let base = score.base();
            if base == UNASSIGNED_BASE || !STANDARD_ARRAY_VALUES.contains(&base) {
                continue;
            }
            if array.holder_of(base).is_none() {
                array.assigned.insert(ability, base);
            }
        }
        array
    }

    /// Adopt the bases only when they already are a valid partial
    /// assignment: every base is 8 or a distinct standard value.
    pub fn adopt(abilities: &AbilityScores) -> Option<Self> {
        let array = Self::from_abilities(abilities);
        abilities
            .iter()
            .all(|(ability, score)| {
                score.base() == array.assignment(ability).unwrap_or(UNASSIGNED_BASE)
            })
            .then_some(array)
    }

    pub fn assignment(&self, ability: Ability) -> Option<i32> {
        self.assigned.get(&ability).copied()
    }

    pub fn assignments(&self) -> &BTreeMap<Ability, i32> {
        &self.assigned
    }

    /// Values not yet assigned, highest first.
    pub fn available_values(&self) -> Vec<i32> {
        STANDARD_ARRAY_VALUES
            .iter()
            .copied()
            .filter(|value| self.holder_of(*value).is_none())
            .collect()
    }

    /// Whether `ability` may take `value`: free, or already its own.
    pub fn is_available_for(&self, ability: Ability, value: i32) -> bool {
        if !STANDARD_ARRAY_VALUES.contains(&value) {
            return false;
        }
        match self.holder_of(value) {
            Some(holder) => holder == ability,
            None => true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.assigned.len() == Ability::ALL.len()
    }

    /// Assign `value` to `ability`, or clear it with `None`.
    pub fn assign(&mut self, ability: Ability, value: Option<i32>) -> Result<(), AllocationError> {
        let Some(value) = value else {
            self.assigned.remove(&ability);
            return Ok(());
        };
        if !STANDARD_ARRAY_VALUES.contains(&value) {
            return Err(AllocationError::NotInStandardArray(value));
        }
        if let Some(holder) = self.holder_of(value) {
            if holder != ability {
                return Err(AllocationError::ValueAlreadyAssigned {
                    value,
                    ability: holder,
                });
            }
            return Ok(());
        }
        self.assigned.insert(ability, value);
        Ok(())
    }

    /// Write assignments into `abilities`; unassigned abilities get 8.
    pub fn apply_to(&self, abilities: &mut AbilityScores) {
        for ability in Ability::ALL {
            let base = self.assignment(ability).unwrap_or(UNASSIGNED_BASE);
            abilities.get_mut(ability).set_base(base);
        }
    }

    fn holder_of(&self, value: i32) -> Option<Ability> {
        self.assigned
            .iter()
            .find(|(_, assigned)| **assigned == value)
            .map(|(ability, _)| *ability)
    }
}
