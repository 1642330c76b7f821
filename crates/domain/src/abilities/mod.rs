//! Ability scores - the six abilities, their per-ability score record, and
//! the fixed-size map a character carries.
//!
//! `AbilityScore` keeps `total == base + bonus` as an invariant: the fields
//! are private and every mutator recomputes the total.

mod derivation;
mod improvement;

pub use derivation::{format_modifier, modifier_of, racial_bonus_of, recompute_all};
pub use improvement::AbilityScoreImprovement;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::score_table::{self, DEFAULT_BASE};

/// The six D&D abilities.
///
/// Serialized with the lowercase short ids used in stored records
/// (`str`, `dex`, `con`, `int`, `wis`, `cha`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    /// Strength - physical power
    Str,
    /// Dexterity - agility and reflexes
    Dex,
    /// Constitution - endurance and health
    Con,
    /// Intelligence - reasoning and memory
    Int,
    /// Wisdom - perception and insight
    Wis,
    /// Charisma - force of personality
    Cha,
}

impl Ability {
    /// All abilities in sheet order.
    pub const ALL: [Ability; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    /// Lowercase id used on the wire (e.g. "str").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Con => "con",
            Self::Int => "int",
            Self::Wis => "wis",
            Self::Cha => "cha",
        }
    }

    /// Uppercase abbreviation (e.g. "STR").
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Dex => "DEX",
            Self::Con => "CON",
            Self::Int => "INT",
            Self::Wis => "WIS",
            Self::Cha => "CHA",
        }
    }

    /// Full name (e.g. "Strength").
    pub fn display_name(&self) -> &'static str {
        score_table::ability_name(*self)
    }

    pub fn description(&self) -> &'static str {
        score_table::ability_description(*self)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "str" | "strength" => Ok(Self::Str),
            "dex" | "dexterity" => Ok(Self::Dex),
            "con" | "constitution" => Ok(Self::Con),
            "int" | "intelligence" => Ok(Self::Int),
            "wis" | "wisdom" => Ok(Self::Wis),
            "cha" | "charisma" => Ok(Self::Cha),
            _ => Err(DomainError::parse(format!("Unknown ability: {}", s))),
        }
    }
}

/// One ability's score: the chosen base, the species bonus, and their sum.
///
/// `touched` records whether the player has edited the base. Method switches
/// only reset untouched abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredAbilityScore")]
pub struct AbilityScore {
    base: i32,
    bonus: i32,
    total: i32,
    touched: bool,
}

/// Stored shape. `total` is ignored and recomputed; `touched` is absent on
/// legacy records, which fall back to "anything but the default base".
#[derive(Deserialize)]
struct StoredAbilityScore {
    base: i32,
    #[serde(default)]
    bonus: i32,
    #[serde(default)]
    touched: Option<bool>,
}

impl From<StoredAbilityScore> for AbilityScore {
    fn from(stored: StoredAbilityScore) -> Self {
        let touched = stored.touched.unwrap_or(stored.base != DEFAULT_BASE);
        Self {
            base: stored.base,
            bonus: stored.bonus,
            total: stored.base.saturating_add(stored.bonus),
            touched,
        }
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

impl AbilityScore {
    /// An untouched score with no bonus.
    pub fn new(base: i32) -> Self {
        Self {
            base,
            bonus: 0,
            total: base,
            touched: false,
        }
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn bonus(&self) -> i32 {
        self.bonus
    }

    pub fn total(&self) -> i32 {
        self.total
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Modifier derived from the total.
    pub fn modifier(&self) -> i32 {
        modifier_of(self.total)
    }

    /// Set the base without changing the touched flag.
    pub fn set_base(&mut self, base: i32) {
        self.base = base;
        self.total = self.base.saturating_add(self.bonus);
    }

    /// Set the base as a player edit.
    pub fn edit_base(&mut self, base: i32) {
        self.set_base(base);
        self.touched = true;
    }

    pub fn set_bonus(&mut self, bonus: i32) {
        self.bonus = bonus;
        self.total = self.base.saturating_add(self.bonus);
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }
}

/// The six ability scores of a character. Always fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "str")]
    strength: AbilityScore,
    #[serde(rename = "dex")]
    dexterity: AbilityScore,
    #[serde(rename = "con")]
    constitution: AbilityScore,
    #[serde(rename = "int")]
    intelligence: AbilityScore,
    #[serde(rename = "wis")]
    wisdom: AbilityScore,
    #[serde(rename = "cha")]
    charisma: AbilityScore,
}

impl AbilityScores {
    /// Fresh scores: every base at the default of 10, untouched.
    pub fn new() -> Self {
        Self::default()
    }

    /// Untouched scores from six bases in `Ability::ALL` order.
    pub fn from_bases(bases: [i32; 6]) -> Self {
        let mut scores = Self::new();
        for (ability, base) in Ability::ALL.into_iter().zip(bases) {
            scores.get_mut(ability).set_base(base);
        }
        scores
    }

    pub fn get(&self, ability: Ability) -> &AbilityScore {
        match ability {
            Ability::Str => &self.strength,
            Ability::Dex => &self.dexterity,
            Ability::Con => &self.constitution,
            Ability::Int => &self.intelligence,
            Ability::Wis => &self.wisdom,
            Ability::Cha => &self.charisma,
        }
    }

    pub fn get_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        match ability {
            Ability::Str => &mut self.strength,
            Ability::Dex => &mut self.dexterity,
            Ability::Con => &mut self.constitution,
            Ability::Int => &mut self.intelligence,
            Ability::Wis => &mut self.wisdom,
            Ability::Cha => &mut self.charisma,
        }
    }

    /// Iterate in sheet order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, &AbilityScore)> {
        Ability::ALL.into_iter().map(move |ability| (ability, self.get(ability)))
    }

    /// Base values in sheet order.
    pub fn bases(&self) -> [i32; 6] {
        Ability::ALL.map(|ability| self.get(ability).base())
    }
}
