//! In-memory repositories.
//!
//! Used when no database path is configured and in tests. Nothing survives a
//! restart.

use async_trait::async_trait;
use charforge_domain::{AbilityScores, CharacterId, CharacterRecord, GenerationMethod};
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::infrastructure::ports::{
    CharacterRepo, ReferenceKind, ReferenceRepo, ReferenceRow, RepoError,
};

#[derive(Default)]
pub struct InMemoryCharacterRepo {
    characters: DashMap<CharacterId, CharacterRecord>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        Ok(self.characters.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError> {
        self.characters.insert(character.id(), character.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CharacterRecord>, RepoError> {
        let mut records: Vec<CharacterRecord> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(records)
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        Ok(self.characters.remove(&id).is_some())
    }

    async fn update_abilities(
        &self,
        id: CharacterId,
        abilities: &AbilityScores,
        method: Option<GenerationMethod>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let mut entry = self
            .characters
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Character", id))?;
        entry.set_abilities(*abilities, method, updated_at);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryReferenceRepo {
    rows: DashMap<(ReferenceKind, String), ReferenceRow>,
}

impl InMemoryReferenceRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ReferenceKind, slug: &str) -> Option<ReferenceRow> {
        self.rows
            .get(&(kind, slug.to_string()))
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl ReferenceRepo for InMemoryReferenceRepo {
    async fn upsert_batch(
        &self,
        kind: ReferenceKind,
        rows: &[ReferenceRow],
    ) -> Result<usize, RepoError> {
        for row in rows {
            self.rows.insert((kind, row.slug.clone()), row.clone());
        }
        Ok(rows.len())
    }

    async fn count(&self, kind: ReferenceKind) -> Result<usize, RepoError> {
        Ok(self.rows.iter().filter(|entry| entry.key().0 == kind).count())
    }
}
