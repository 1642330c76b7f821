use std::collections::BTreeMap;

use super::{AllocationError, Direction};
use crate::abilities::{Ability, AbilityScores};
use crate::score_table::{
    point_buy_cost, POINT_BUY_BASE_SCORE, POINT_BUY_MAX_SCORE, POINT_BUY_TOTAL_POINTS,
};

/// Point cost of a score. Scores outside 8..=15 cost nothing.
pub fn cost(score: i32) -> i32 {
    point_buy_cost(score).unwrap_or(0)
}

/// Point-buy allocation: six scores in 8..=15 sharing a 27 point budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointBuy {
    scores: BTreeMap<Ability, i32>,
}

impl Default for PointBuy {
    fn default() -> Self {
        Self::new()
    }
}

impl PointBuy {
    /// Every score at the floor.
    pub fn new() -> Self {
        Self {
            scores: Ability::ALL
                .into_iter()
                .map(|ability| (ability, POINT_BUY_BASE_SCORE))
                .collect(),
        }
    }

    /// Adopt the bases as they are, or `None` when any base is outside
    /// 8..=15 or the spread costs more than the budget.
    pub fn adopt(abilities: &AbilityScores) -> Option<Self> {
        let in_range = abilities
            .iter()
            .all(|(_, s)| (POINT_BUY_BASE_SCORE..=POINT_BUY_MAX_SCORE).contains(&s.base()));
        if !in_range {
            return None;
        }
        let candidate = Self {
            scores: abilities.iter().map(|(a, s)| (a, s.base())).collect(),
        };
        (candidate.points_used() <= POINT_BUY_TOTAL_POINTS).then_some(candidate)
    }

    /// Start point buy from existing bases.
    ///
    /// Bases outside 8..=15 drop to 8 while the rest are kept. If the kept
    /// bases still cost more than 27 points, every score starts at 8.
    pub fn from_abilities(abilities: &AbilityScores) -> Self {
        let candidate = Self {
            scores: abilities
                .iter()
                .map(|(a, s)| {
                    let base = s.base();
                    if (POINT_BUY_BASE_SCORE..=POINT_BUY_MAX_SCORE).contains(&base) {
                        (a, base)
                    } else {
                        (a, POINT_BUY_BASE_SCORE)
                    }
                })
                .collect(),
        };
        if candidate.points_used() <= POINT_BUY_TOTAL_POINTS {
            candidate
        } else {
            Self::new()
        }
    }

    pub fn score(&self, ability: Ability) -> i32 {
        self.scores
            .get(&ability)
            .copied()
            .unwrap_or(POINT_BUY_BASE_SCORE)
    }

    pub fn points_used(&self) -> i32 {
        self.scores.values().map(|score| cost(*score)).sum()
    }

    pub fn points_remaining(&self) -> i32 {
        POINT_BUY_TOTAL_POINTS - self.points_used()
    }

    pub fn can_increase(&self, ability: Ability) -> bool {
        self.increase_cost(ability)
            .is_some_and(|step| self.points_used() + step <= POINT_BUY_TOTAL_POINTS)
    }

    pub fn can_decrease(&self, ability: Ability) -> bool {
        self.score(ability) > POINT_BUY_BASE_SCORE
    }

    /// Step one score up or down. Returns the new score.
    pub fn adjust(&mut self, ability: Ability, direction: Direction) -> Result<i32, AllocationError> {
        let current = self.score(ability);
        let next = match direction {
            Direction::Increase => {
                let Some(step) = self.increase_cost(ability) else {
                    return Err(AllocationError::AboveMaximum {
                        ability,
                        max: POINT_BUY_MAX_SCORE,
                    });
                };
                let remaining = self.points_remaining();
                if step > remaining {
                    return Err(AllocationError::BudgetExceeded {
                        ability,
                        needed: step,
                        remaining,
                    });
                }
                current + 1
            }
            Direction::Decrease => {
                if !self.can_decrease(ability) {
                    return Err(AllocationError::BelowMinimum {
                        ability,
                        min: POINT_BUY_BASE_SCORE,
                    });
                }
                current - 1
            }
        };
        self.scores.insert(ability, next);
        Ok(next)
    }

    /// Write scores into `abilities` as bases.
    pub fn apply_to(&self, abilities: &mut AbilityScores) {
        for ability in Ability::ALL {
            abilities.get_mut(ability).set_base(self.score(ability));
        }
    }

    /// Marginal cost of one more point, `None` at the maximum.
    fn increase_cost(&self, ability: Ability) -> Option<i32> {
        let current = self.score(ability);
        if current >= POINT_BUY_MAX_SCORE {
            return None;
        }
        Some(cost(current + 1) - cost(current))
    }
}
