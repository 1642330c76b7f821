//! Ability screen controller.
//!
//! `AbilityScreen` owns the canonical ability scores for one character while
//! they are being edited. Every change arrives as an [`AbilityCommand`] and
//! goes through [`AbilityScreen::apply`], which routes it to the active
//! generation method and recomputes bonuses before returning.

mod view;

pub use view::{AbilityRow, AbilityScreenView, MethodDetail, PointBuyRow};

use serde::{Deserialize, Serialize};

use crate::abilities::{recompute_all, Ability, AbilityScores};
use crate::character::CharacterRecord;
use crate::error::DomainError;
use crate::generation::{Direction, GenerationMethod, ManualEntry, PointBuy, StandardArray};
use crate::score_table::UNASSIGNED_BASE;
use crate::species::Species;

/// A single edit on the ability screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AbilityCommand {
    SelectMethod {
        method: GenerationMethod,
    },
    AssignStandard {
        ability: Ability,
        #[serde(default)]
        value: Option<i32>,
    },
    AdjustPointBuy {
        ability: Ability,
        direction: Direction,
    },
    SetManualBase {
        ability: Ability,
        value: i32,
    },
    SpeciesChanged {
        #[serde(default)]
        species: Option<Species>,
    },
}

/// Per-method state kept alongside the scores.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MethodState {
    StandardArray(StandardArray),
    PointBuy(PointBuy),
    Roll,
    Manual,
}

impl MethodState {
    fn method(&self) -> GenerationMethod {
        match self {
            Self::StandardArray(_) => GenerationMethod::StandardArray,
            Self::PointBuy(_) => GenerationMethod::PointBuy,
            Self::Roll => GenerationMethod::Roll,
            Self::Manual => GenerationMethod::Manual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityScreen {
    abilities: AbilityScores,
    species: Option<Species>,
    state: MethodState,
}

impl AbilityScreen {
    /// Open the screen on stored scores.
    ///
    /// Without a stored method the method is inferred from the bases. Bonuses
    /// are recomputed against `species` before anything else happens. Bases
    /// are never rewritten here: when they no longer fit the stored method
    /// (an improvement pushed a score past 15, say) the screen opens in
    /// manual mode instead.
    pub fn open(
        abilities: &AbilityScores,
        species: Option<Species>,
        method: Option<GenerationMethod>,
    ) -> Self {
        let method = method.unwrap_or_else(|| GenerationMethod::infer_from_scores(abilities));
        let abilities = recompute_all(abilities, species.as_ref());
        let state = Self::resume_state(method, &abilities);
        Self {
            abilities,
            species,
            state,
        }
    }

    pub fn from_record(record: &CharacterRecord) -> Self {
        Self::open(
            record.abilities(),
            record.species().cloned(),
            record.generation_method(),
        )
    }

    pub fn method(&self) -> GenerationMethod {
        self.state.method()
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn species(&self) -> Option<&Species> {
        self.species.as_ref()
    }

    /// Apply one command. On error nothing changes.
    pub fn apply(&mut self, command: AbilityCommand) -> Result<(), DomainError> {
        match command {
            AbilityCommand::SelectMethod { method } => {
                self.select_method(method);
                Ok(())
            }
            AbilityCommand::AssignStandard { ability, value } => {
                let MethodState::StandardArray(array) = &mut self.state else {
                    return Err(wrong_method(GenerationMethod::StandardArray));
                };
                array.assign(ability, value)?;
                array.apply_to(&mut self.abilities);
                self.abilities.get_mut(ability).mark_touched();
                Ok(())
            }
            AbilityCommand::AdjustPointBuy { ability, direction } => {
                let MethodState::PointBuy(point_buy) = &mut self.state else {
                    return Err(wrong_method(GenerationMethod::PointBuy));
                };
                point_buy.adjust(ability, direction)?;
                point_buy.apply_to(&mut self.abilities);
                self.abilities.get_mut(ability).mark_touched();
                Ok(())
            }
            AbilityCommand::SetManualBase { ability, value } => {
                if self.state != MethodState::Manual {
                    return Err(wrong_method(GenerationMethod::Manual));
                }
                ManualEntry::set_base(&mut self.abilities, ability, value)
            }
            AbilityCommand::SpeciesChanged { species } => {
                self.species = species;
                self.abilities = recompute_all(&self.abilities, self.species.as_ref());
                Ok(())
            }
        }
    }

    pub fn view(&self) -> AbilityScreenView {
        AbilityScreenView::build(self.method(), &self.abilities, self.state_detail())
    }

    fn state_detail(&self) -> MethodDetail {
        match &self.state {
            MethodState::StandardArray(array) => MethodDetail::from_standard_array(array),
            MethodState::PointBuy(point_buy) => MethodDetail::from_point_buy(point_buy),
            MethodState::Roll => MethodDetail::Roll,
            MethodState::Manual => MethodDetail::Manual,
        }
    }

    fn select_method(&mut self, method: GenerationMethod) {
        if method == self.method() {
            return;
        }
        if method != GenerationMethod::Manual {
            for ability in Ability::ALL {
                let score = self.abilities.get_mut(ability);
                if !score.is_touched() {
                    score.set_base(UNASSIGNED_BASE);
                }
            }
        }
        self.state = Self::switch_state(method, &mut self.abilities);
        self.abilities = recompute_all(&self.abilities, self.species.as_ref());
    }

    /// Strategy state for stored bases, falling back to manual when the
    /// bases are not a legal allocation for `method`.
    fn resume_state(method: GenerationMethod, abilities: &AbilityScores) -> MethodState {
        let resumed = match method {
            GenerationMethod::StandardArray => {
                StandardArray::adopt(abilities).map(MethodState::StandardArray)
            }
            GenerationMethod::PointBuy => PointBuy::adopt(abilities).map(MethodState::PointBuy),
            GenerationMethod::Roll => Some(MethodState::Roll),
            GenerationMethod::Manual => Some(MethodState::Manual),
        };
        resumed.unwrap_or(MethodState::Manual)
    }

    /// Strategy state for an explicit switch. Bases the new method cannot
    /// hold are reset and the result is written back so both sides agree.
    fn switch_state(method: GenerationMethod, abilities: &mut AbilityScores) -> MethodState {
        match method {
            GenerationMethod::StandardArray => {
                let array = StandardArray::from_abilities(abilities);
                array.apply_to(abilities);
                MethodState::StandardArray(array)
            }
            GenerationMethod::PointBuy => {
                let point_buy = PointBuy::from_abilities(abilities);
                point_buy.apply_to(abilities);
                MethodState::PointBuy(point_buy)
            }
            GenerationMethod::Roll => MethodState::Roll,
            GenerationMethod::Manual => MethodState::Manual,
        }
    }
}

fn wrong_method(expected: GenerationMethod) -> DomainError {
    DomainError::invalid_state_transition(format!("{} is not the active method", expected))
}
