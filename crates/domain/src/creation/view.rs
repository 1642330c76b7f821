//! Read model of the ability screen, shaped for JSON clients.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::abilities::{format_modifier, Ability, AbilityScores};
use crate::generation::{cost, GenerationMethod, PointBuy, StandardArray};
use crate::score_table::POINT_BUY_TOTAL_POINTS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScreenView {
    pub method: GenerationMethod,
    pub method_name: &'static str,
    pub abilities: Vec<AbilityRow>,
    pub detail: MethodDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRow {
    pub id: Ability,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub base: i32,
    pub bonus: i32,
    pub total: i32,
    pub modifier: i32,
    pub modifier_label: String,
    pub touched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointBuyRow {
    pub ability: Ability,
    pub score: i32,
    pub cost: i32,
    pub can_increase: bool,
    pub can_decrease: bool,
}

/// Method-specific panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MethodDetail {
    #[serde(rename_all = "camelCase")]
    StandardArray {
        assignments: BTreeMap<Ability, i32>,
        available_values: Vec<i32>,
        complete: bool,
    },
    #[serde(rename_all = "camelCase")]
    PointBuy {
        budget: i32,
        points_used: i32,
        points_remaining: i32,
        scores: Vec<PointBuyRow>,
    },
    Roll,
    Manual,
}

impl MethodDetail {
    pub(crate) fn from_standard_array(array: &StandardArray) -> Self {
        Self::StandardArray {
            assignments: array.assignments().clone(),
            available_values: array.available_values(),
            complete: array.is_complete(),
        }
    }

    pub(crate) fn from_point_buy(point_buy: &PointBuy) -> Self {
        Self::PointBuy {
            budget: POINT_BUY_TOTAL_POINTS,
            points_used: point_buy.points_used(),
            points_remaining: point_buy.points_remaining(),
            scores: Ability::ALL
                .into_iter()
                .map(|ability| PointBuyRow {
                    ability,
                    score: point_buy.score(ability),
                    cost: cost(point_buy.score(ability)),
                    can_increase: point_buy.can_increase(ability),
                    can_decrease: point_buy.can_decrease(ability),
                })
                .collect(),
        }
    }
}

impl AbilityScreenView {
    pub(crate) fn build(
        method: GenerationMethod,
        abilities: &AbilityScores,
        detail: MethodDetail,
    ) -> Self {
        let rows = abilities
            .iter()
            .map(|(ability, score)| AbilityRow {
                id: ability,
                name: ability.display_name(),
                short_name: ability.short_name(),
                description: ability.description(),
                base: score.base(),
                bonus: score.bonus(),
                total: score.total(),
                modifier: score.modifier(),
                modifier_label: format_modifier(score.modifier()),
                touched: score.is_touched(),
            })
            .collect();

        Self {
            method,
            method_name: method.display_name(),
            abilities: rows,
            detail,
        }
    }
}
