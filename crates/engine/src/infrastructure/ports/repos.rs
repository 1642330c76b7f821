//! Repository port traits for storage access.

use async_trait::async_trait;
use charforge_domain::{AbilityScores, CharacterId, CharacterRecord, GenerationMethod};
use chrono::{DateTime, Utc};

use super::error::RepoError;
use super::types::{ReferenceKind, ReferenceRow};

// =============================================================================
// Character Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError>;
    /// Insert or fully replace a record.
    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError>;
    /// All records, newest first.
    async fn list(&self) -> Result<Vec<CharacterRecord>, RepoError>;
    /// Returns false when no record had this id.
    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError>;

    /// Replace the whole ability map and the method that produced it.
    async fn update_abilities(
        &self,
        id: CharacterId,
        abilities: &AbilityScores,
        method: Option<GenerationMethod>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Reference Tables
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepo: Send + Sync {
    /// Insert or replace rows by slug. Returns the number written.
    async fn upsert_batch(
        &self,
        kind: ReferenceKind,
        rows: &[ReferenceRow],
    ) -> Result<usize, RepoError>;

    async fn count(&self, kind: ReferenceKind) -> Result<usize, RepoError>;
}
