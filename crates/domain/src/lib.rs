pub mod abilities;
pub mod character;
pub mod creation;
pub mod error;
pub mod generation;
pub mod ids;
pub mod score_table;
pub mod species;

pub use abilities::{
    format_modifier, modifier_of, racial_bonus_of, recompute_all, Ability, AbilityScore,
    AbilityScoreImprovement, AbilityScores,
};
pub use character::CharacterRecord;
pub use creation::{
    AbilityCommand, AbilityRow, AbilityScreen, AbilityScreenView, MethodDetail, PointBuyRow,
};
pub use error::DomainError;
pub use generation::{
    AllocationError, Direction, GenerationMethod, ManualEntry, PointBuy, StandardArray,
};
pub use ids::CharacterId;
pub use species::Species;
