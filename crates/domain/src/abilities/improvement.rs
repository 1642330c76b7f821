//! Ability score improvement granted on level-up.
//!
//! Two points to spend, at most two on one ability, and no score may end
//! above 20.

use std::collections::BTreeMap;

use super::{Ability, AbilityScores};
use crate::generation::AllocationError;
use crate::score_table::{IMPROVEMENT_MAX_PER_ABILITY, IMPROVEMENT_POINTS, IMPROVEMENT_SCORE_CAP};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbilityScoreImprovement {
    spent: BTreeMap<Ability, u8>,
}

impl AbilityScoreImprovement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a requested allocation, validating each point in turn.
    pub fn from_allocation(
        allocation: &BTreeMap<Ability, u8>,
        abilities: &AbilityScores,
    ) -> Result<Self, AllocationError> {
        let mut improvement = Self::new();
        for (&ability, &points) in allocation {
            for _ in 0..points {
                improvement.increase(ability, abilities)?;
            }
        }
        Ok(improvement)
    }

    /// Points placed on `ability` so far.
    pub fn points_on(&self, ability: Ability) -> u8 {
        self.spent.get(&ability).copied().unwrap_or(0)
    }

    pub fn spent(&self) -> u8 {
        self.spent.values().sum()
    }

    pub fn remaining(&self) -> u8 {
        IMPROVEMENT_POINTS.saturating_sub(self.spent())
    }

    pub fn is_complete(&self) -> bool {
        self.spent() == IMPROVEMENT_POINTS
    }

    /// Spend one point on `ability`.
    pub fn increase(
        &mut self,
        ability: Ability,
        abilities: &AbilityScores,
    ) -> Result<u8, AllocationError> {
        let current = self.points_on(ability);
        if current >= IMPROVEMENT_MAX_PER_ABILITY {
            return Err(AllocationError::ImprovementAbilityLimit {
                ability,
                max: IMPROVEMENT_MAX_PER_ABILITY,
            });
        }
        if self.remaining() == 0 {
            return Err(AllocationError::ImprovementBudgetExhausted);
        }
        let projected = abilities
            .get(ability)
            .total()
            .saturating_add(i32::from(current) + 1);
        if projected > IMPROVEMENT_SCORE_CAP {
            return Err(AllocationError::ImprovementCapReached { ability });
        }
        let next = current + 1;
        self.spent.insert(ability, next);
        Ok(next)
    }

    /// Take back one point from `ability`.
    pub fn decrease(&mut self, ability: Ability) -> Result<u8, AllocationError> {
        let current = self.points_on(ability);
        if current == 0 {
            return Err(AllocationError::BelowMinimum { ability, min: 0 });
        }
        let next = current - 1;
        if next == 0 {
            self.spent.remove(&ability);
        } else {
            self.spent.insert(ability, next);
        }
        Ok(next)
    }

    /// Raise the bases. Fails unless every point has been spent.
    pub fn apply(&self, abilities: &mut AbilityScores) -> Result<(), AllocationError> {
        if !self.is_complete() {
            return Err(AllocationError::ImprovementIncomplete {
                spent: self.spent(),
            });
        }
        for (&ability, &points) in &self.spent {
            let score = abilities.get_mut(ability);
            score.edit_base(score.base().saturating_add(i32::from(points)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> AbilityScores {
        AbilityScores::from_bases([15, 14, 13, 12, 10, 8])
    }

    #[test]
    fn two_points_on_one_ability() {
        let mut abilities = scores();
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Str, &abilities).expect("first point");
        asi.increase(Ability::Str, &abilities).expect("second point");
        assert!(asi.is_complete());

        asi.apply(&mut abilities).expect("apply");
        assert_eq!(abilities.get(Ability::Str).base(), 17);
        assert_eq!(abilities.get(Ability::Str).total(), 17);
        assert!(abilities.get(Ability::Str).is_touched());
    }

    #[test]
    fn one_point_on_two_abilities() {
        let mut abilities = scores();
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Dex, &abilities).expect("dex");
        asi.increase(Ability::Wis, &abilities).expect("wis");
        asi.apply(&mut abilities).expect("apply");
        assert_eq!(abilities.get(Ability::Dex).base(), 15);
        assert_eq!(abilities.get(Ability::Wis).base(), 11);
    }

    #[test]
    fn third_point_is_rejected() {
        let abilities = scores();
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Dex, &abilities).expect("dex");
        asi.increase(Ability::Con, &abilities).expect("con");
        assert_eq!(
            asi.increase(Ability::Int, &abilities),
            Err(AllocationError::ImprovementBudgetExhausted)
        );
        assert_eq!(asi.remaining(), 0);
    }

    #[test]
    fn third_point_on_one_ability_names_the_per_ability_limit() {
        let abilities = scores();
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Wis, &abilities).expect("first");
        asi.increase(Ability::Wis, &abilities).expect("second");
        let err = asi
            .increase(Ability::Wis, &abilities)
            .expect_err("third point on wis");
        assert_eq!(
            err.to_string(),
            "wis already holds the 2 improvement points one ability may take"
        );
    }

    #[test]
    fn score_cap_is_enforced() {
        let mut abilities = scores();
        abilities.get_mut(Ability::Str).set_base(19);
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Str, &abilities).expect("19 -> 20");
        assert_eq!(
            asi.increase(Ability::Str, &abilities),
            Err(AllocationError::ImprovementCapReached {
                ability: Ability::Str
            })
        );
    }

    #[test]
    fn cap_counts_species_bonus() {
        let mut abilities = scores();
        abilities.get_mut(Ability::Cha).set_base(18);
        abilities.get_mut(Ability::Cha).set_bonus(2);
        let mut asi = AbilityScoreImprovement::new();
        assert!(matches!(
            asi.increase(Ability::Cha, &abilities),
            Err(AllocationError::ImprovementCapReached { .. })
        ));
    }

    #[test]
    fn decrease_returns_point() {
        let abilities = scores();
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Int, &abilities).expect("int");
        assert_eq!(asi.decrease(Ability::Int), Ok(0));
        assert_eq!(asi.remaining(), 2);
        assert!(matches!(
            asi.decrease(Ability::Int),
            Err(AllocationError::BelowMinimum { .. })
        ));
    }

    #[test]
    fn incomplete_improvement_cannot_apply() {
        let mut abilities = scores();
        let mut asi = AbilityScoreImprovement::new();
        asi.increase(Ability::Str, &abilities).expect("str");
        assert_eq!(
            asi.apply(&mut abilities),
            Err(AllocationError::ImprovementIncomplete { spent: 1 })
        );
        assert_eq!(abilities.get(Ability::Str).base(), 15);
    }

    #[test]
    fn from_allocation_validates_every_point() {
        let abilities = scores();
        let mut allocation = BTreeMap::new();
        allocation.insert(Ability::Str, 3);
        assert_eq!(
            AbilityScoreImprovement::from_allocation(&allocation, &abilities),
            Err(AllocationError::ImprovementAbilityLimit {
                ability: Ability::Str,
                max: 2
            })
        );

        allocation.insert(Ability::Str, 2);
        let asi = AbilityScoreImprovement::from_allocation(&allocation, &abilities)
            .expect("valid allocation");
        assert!(asi.is_complete());
    }
}
