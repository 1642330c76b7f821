//! Species as supplied by callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::abilities::Ability;

/// A playable species. The name drives the fixed bonus table; subspecies
/// bonuses are added on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    subspecies_ability_bonus: BTreeMap<Ability, i32>,
}

impl Species {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subspecies_ability_bonus: BTreeMap::new(),
        }
    }

    pub fn with_subspecies_bonus(mut self, ability: Ability, bonus: i32) -> Self {
        self.subspecies_ability_bonus.insert(ability, bonus);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subspecies bonus for `ability`, 0 when none is set.
    pub fn subspecies_bonus(&self, ability: Ability) -> i32 {
        self.subspecies_ability_bonus
            .get(&ability)
            .copied()
            .unwrap_or(0)
    }

    pub fn subspecies_bonuses(&self) -> &BTreeMap<Ability, i32> {
        &self.subspecies_ability_bonus
    }
}
