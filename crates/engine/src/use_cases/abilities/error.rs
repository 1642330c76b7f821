//! Ability score operation errors.

use charforge_domain::{CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during ability score operations.
#[derive(Debug, thiserror::Error)]
pub enum AbilitiesError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
