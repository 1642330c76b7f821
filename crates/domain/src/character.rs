//! Character record - the persisted character being built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::abilities::AbilityScores;
use crate::error::DomainError;
use crate::generation::GenerationMethod;
use crate::ids::CharacterId;
use crate::species::Species;

/// Longest accepted character name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    id: CharacterId,
    name: String,
    level: u8,
    species: Option<Species>,
    class_name: Option<String>,
    abilities: AbilityScores,
    /// Absent on records written before the method was stored.
    #[serde(default)]
    generation_method: Option<GenerationMethod>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CharacterRecord {
    /// A level 1 character with default scores and no method chosen yet.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Character name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self {
            id: CharacterId::new(),
            name,
            level: 1,
            species: None,
            class_name: None,
            abilities: AbilityScores::new(),
            generation_method: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct a record from storage
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: CharacterId,
        name: String,
        level: u8,
        species: Option<Species>,
        class_name: Option<String>,
        abilities: AbilityScores,
        generation_method: Option<GenerationMethod>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            level,
            species,
            class_name,
            abilities,
            generation_method,
            created_at,
            updated_at,
        }
    }

    // Read accessors
    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn species(&self) -> Option<&Species> {
        self.species.as_ref()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn generation_method(&self) -> Option<GenerationMethod> {
        self.generation_method
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Builder methods
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_species(mut self, species: Species) -> Self {
        self.species = Some(species);
        self
    }

    // Mutations
    /// Replace the full ability map and record the method that produced it.
    pub fn set_abilities(
        &mut self,
        abilities: AbilityScores,
        method: Option<GenerationMethod>,
        now: DateTime<Utc>,
    ) {
        self.abilities = abilities;
        if method.is_some() {
            self.generation_method = method;
        }
        self.updated_at = now;
    }

    pub fn set_species(&mut self, species: Option<Species>, now: DateTime<Utc>) {
        self.species = species;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::Ability;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn new_record_has_defaults() {
        let record = CharacterRecord::new("  Brenna  ", now()).expect("valid name");
        assert_eq!(record.name(), "Brenna");
        assert_eq!(record.level(), 1);
        assert_eq!(record.generation_method(), None);
        assert_eq!(record.abilities(), &AbilityScores::new());
        assert_eq!(record.created_at(), record.updated_at());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            CharacterRecord::new("   ", now()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn long_name_is_rejected() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(CharacterRecord::new(name, now()).is_err());
        let name = "x".repeat(MAX_NAME_LENGTH);
        assert!(CharacterRecord::new(name, now()).is_ok());
    }

    #[test]
    fn set_abilities_keeps_method_when_none_given() {
        let mut record = CharacterRecord::new("Brenna", now()).expect("valid name");
        let later = now() + chrono::Duration::minutes(5);
        record.set_abilities(
            AbilityScores::from_bases([15, 14, 13, 12, 10, 8]),
            Some(GenerationMethod::StandardArray),
            later,
        );
        record.set_abilities(AbilityScores::new(), None, later);
        assert_eq!(
            record.generation_method(),
            Some(GenerationMethod::StandardArray)
        );
        assert_eq!(record.updated_at(), later);
    }

    #[test]
    fn legacy_json_without_method_loads() {
        let record = CharacterRecord::new("Brenna", now())
            .expect("valid name")
            .with_species(Species::new("Elf"));
        let mut json = serde_json::to_value(&record).expect("serialize");
        json.as_object_mut()
            .expect("object")
            .remove("generationMethod");
        let loaded: CharacterRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(loaded.generation_method(), None);
        assert_eq!(loaded.species().map(Species::name), Some("Elf"));
        assert_eq!(loaded.abilities().get(Ability::Str).base(), 10);
    }
}
