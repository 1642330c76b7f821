//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod abilities;
pub mod reference_import;

pub use abilities::{AbilitiesError, AbilityScoreUseCases, NewCharacter};
pub use reference_import::{ImportError, ImportSummary, ReferenceImportUseCase};
