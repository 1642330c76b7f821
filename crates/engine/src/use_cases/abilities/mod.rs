//! Ability score use cases.
//!
//! Every operation loads the stored record, rebuilds the ability screen from
//! it, applies one change and writes the full ability map back. Nothing is
//! held between requests.

mod error;

pub use error::AbilitiesError;

use std::collections::BTreeMap;
use std::sync::Arc;

use charforge_domain::{
    recompute_all, Ability, AbilityCommand, AbilityScoreImprovement, AbilityScreen,
    AbilityScreenView, CharacterId, CharacterRecord, DomainError, Species,
};

use crate::infrastructure::ports::{CharacterRepo, ClockPort};

/// Input for creating a character.
#[derive(Debug, Clone, Default)]
pub struct NewCharacter {
    pub name: String,
    pub species: Option<Species>,
    pub class_name: Option<String>,
}

impl NewCharacter {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Container for ability score use cases.
pub struct AbilityScoreUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
}

impl AbilityScoreUseCases {
    pub fn new(character_repo: Arc<dyn CharacterRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            character_repo,
            clock,
        }
    }

    /// Create a level 1 character with every base at 10 and no method yet.
    pub async fn create_character(
        &self,
        input: NewCharacter,
    ) -> Result<CharacterRecord, AbilitiesError> {
        let mut record = CharacterRecord::new(input.name, self.clock.now())?;
        if let Some(class_name) = input.class_name.filter(|c| !c.trim().is_empty()) {
            record = record.with_class_name(class_name);
        }
        if let Some(species) = input.species {
            let abilities = recompute_all(record.abilities(), Some(&species));
            record = record.with_species(species);
            record.set_abilities(abilities, None, record.created_at());
        }

        self.character_repo.save(&record).await?;
        tracing::info!(character_id = %record.id(), name = %record.name(), "Created character");
        Ok(record)
    }

    pub async fn get_character(&self, id: CharacterId) -> Result<CharacterRecord, AbilitiesError> {
        self.load(id).await
    }

    pub async fn list_characters(&self) -> Result<Vec<CharacterRecord>, AbilitiesError> {
        Ok(self.character_repo.list().await?)
    }

    pub async fn delete_character(&self, id: CharacterId) -> Result<(), AbilitiesError> {
        if !self.character_repo.delete(id).await? {
            return Err(AbilitiesError::CharacterNotFound(id));
        }
        tracing::info!(character_id = %id, "Deleted character");
        Ok(())
    }

    /// Current screen state for a character, without persisting anything.
    pub async fn open_screen(&self, id: CharacterId) -> Result<AbilityScreenView, AbilitiesError> {
        let record = self.load(id).await?;
        Ok(AbilityScreen::from_record(&record).view())
    }

    /// Apply one screen command and persist the resulting ability map.
    ///
    /// A rejected command leaves the stored record untouched.
    pub async fn apply_command(
        &self,
        id: CharacterId,
        command: AbilityCommand,
    ) -> Result<AbilityScreenView, AbilitiesError> {
        let record = self.load(id).await?;
        let mut screen = AbilityScreen::from_record(&record);

        if let Err(e) = screen.apply(command.clone()) {
            tracing::debug!(character_id = %id, error = %e, ?command, "Ability command rejected");
            return Err(e.into());
        }

        self.character_repo
            .update_abilities(
                id,
                screen.abilities(),
                Some(screen.method()),
                self.clock.now(),
            )
            .await?;

        tracing::debug!(character_id = %id, method = %screen.method(), "Applied ability command");
        Ok(screen.view())
    }

    /// Store a new species and recompute every bonus against it.
    pub async fn change_species(
        &self,
        id: CharacterId,
        species: Option<Species>,
    ) -> Result<AbilityScreenView, AbilitiesError> {
        let mut record = self.load(id).await?;
        let mut screen = AbilityScreen::from_record(&record);
        screen.apply(AbilityCommand::SpeciesChanged {
            species: species.clone(),
        })?;

        let now = self.clock.now();
        record.set_species(species, now);
        record.set_abilities(*screen.abilities(), Some(screen.method()), now);
        self.character_repo.save(&record).await?;

        tracing::info!(
            character_id = %id,
            species = record.species().map(Species::name).unwrap_or("none"),
            "Changed species"
        );
        Ok(screen.view())
    }

    /// Spend an ability score improvement: two points, at most two per
    /// ability, no score above 20. The character's level is not changed.
    ///
    /// The stored method is kept while the raised bases still form a legal
    /// allocation for it. Otherwise the record switches to manual.
    pub async fn improve_abilities(
        &self,
        id: CharacterId,
        allocation: &BTreeMap<Ability, u8>,
    ) -> Result<CharacterRecord, AbilitiesError> {
        let mut record = self.load(id).await?;

        let improvement = AbilityScoreImprovement::from_allocation(allocation, record.abilities())
            .map_err(DomainError::from)?;
        let mut abilities = *record.abilities();
        improvement
            .apply(&mut abilities)
            .map_err(DomainError::from)?;
        let abilities = recompute_all(&abilities, record.species());

        let method = record.generation_method().and_then(|stored| {
            let resumed =
                AbilityScreen::open(&abilities, record.species().cloned(), Some(stored)).method();
            (resumed != stored).then_some(resumed)
        });
        if let Some(method) = method {
            tracing::info!(character_id = %id, %method, "Improved scores left the stored method");
        }

        let now = self.clock.now();
        self.character_repo
            .update_abilities(id, &abilities, method, now)
            .await?;
        record.set_abilities(abilities, method, now);

        tracing::info!(character_id = %id, ?allocation, "Applied ability score improvement");
        Ok(record)
    }

    async fn load(&self, id: CharacterId) -> Result<CharacterRecord, AbilitiesError> {
        self.character_repo
            .get(id)
            .await?
            .ok_or(AbilitiesError::CharacterNotFound(id))
    }
}
