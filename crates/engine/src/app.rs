//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, ReferenceRepo, ReferenceSource};
use crate::use_cases;

/// Main application state.
///
/// Holds the repositories and use cases. Passed to HTTP handlers via Axum
/// state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the storage ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub reference: Arc<dyn ReferenceRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub abilities: use_cases::AbilityScoreUseCases,
    pub reference_import: use_cases::ReferenceImportUseCase,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        reference_repo: Arc<dyn ReferenceRepo>,
        reference_source: Arc<dyn ReferenceSource>,
        clock: Arc<dyn ClockPort>,
        import_batch_size: usize,
    ) -> Self {
        let abilities = use_cases::AbilityScoreUseCases::new(character_repo.clone(), clock);
        let reference_import = use_cases::ReferenceImportUseCase::new(
            reference_source,
            reference_repo.clone(),
            import_batch_size,
        );

        Self {
            repositories: Repositories {
                character: character_repo,
                reference: reference_repo,
            },
            use_cases: UseCases {
                abilities,
                reference_import,
            },
        }
    }
}
