//! SQLite-backed character and reference storage.

use std::sync::Arc;

use async_trait::async_trait;
use charforge_domain::{
    AbilityScores, CharacterId, CharacterRecord, GenerationMethod, Species,
};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::infrastructure::ports::{
    CharacterRepo, ClockPort, ReferenceKind, ReferenceRepo, ReferenceRow, RepoError,
};

/// Open (creating if needed) the database file at `db_path`.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))
}

// =============================================================================
// Characters
// =============================================================================

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub async fn new(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                level INTEGER NOT NULL,
                species_json TEXT,
                class_name TEXT,
                abilities_json TEXT NOT NULL,
                generation_method TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("characters_schema", e))?;

        Ok(Self { pool })
    }

    fn row_to_record(row: &SqliteRow) -> Result<CharacterRecord, RepoError> {
        let id: String = column(row, "id")?;
        let id = Uuid::parse_str(&id).map_err(RepoError::serialization)?;
        let name: String = column(row, "name")?;
        let level: i64 = column(row, "level")?;
        let level = u8::try_from(level)
            .map_err(|_| RepoError::serialization(format!("level out of range: {}", level)))?;

        let species_json: Option<String> = column(row, "species_json")?;
        let species: Option<Species> = species_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(RepoError::serialization)?;

        let class_name: Option<String> = column(row, "class_name")?;

        let abilities_json: String = column(row, "abilities_json")?;
        let abilities: AbilityScores =
            serde_json::from_str(&abilities_json).map_err(RepoError::serialization)?;

        let method: Option<String> = column(row, "generation_method")?;
        let method = method
            .map(|m| m.parse::<GenerationMethod>())
            .transpose()
            .map_err(RepoError::serialization)?;

        let created_at = parse_timestamp(&column::<String>(row, "created_at")?)?;
        let updated_at = parse_timestamp(&column::<String>(row, "updated_at")?)?;

        Ok(CharacterRecord::from_storage(
            CharacterId::from_uuid(id),
            name,
            level,
            species,
            class_name,
            abilities,
            method,
            created_at,
            updated_at,
        ))
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterRecord>, RepoError> {
        let row = sqlx::query("SELECT * FROM characters WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_character", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn save(&self, character: &CharacterRecord) -> Result<(), RepoError> {
        let species_json = character
            .species()
            .map(serde_json::to_string)
            .transpose()
            .map_err(RepoError::serialization)?;
        let abilities_json =
            serde_json::to_string(character.abilities()).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO characters (
                id, name, level, species_json, class_name, abilities_json,
                generation_method, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                level = excluded.level,
                species_json = excluded.species_json,
                class_name = excluded.class_name,
                abilities_json = excluded.abilities_json,
                generation_method = excluded.generation_method,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(character.id().to_string())
        .bind(character.name())
        .bind(i64::from(character.level()))
        .bind(species_json)
        .bind(character.class_name())
        .bind(abilities_json)
        .bind(character.generation_method().map(|m| m.as_str()))
        .bind(character.created_at().to_rfc3339())
        .bind(character.updated_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_character", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<CharacterRecord>, RepoError> {
        let rows = sqlx::query("SELECT * FROM characters ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_characters", e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_abilities(
        &self,
        id: CharacterId,
        abilities: &AbilityScores,
        method: Option<GenerationMethod>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let abilities_json = serde_json::to_string(abilities).map_err(RepoError::serialization)?;

        let result = sqlx::query(
            r#"
            UPDATE characters SET
                abilities_json = ?,
                generation_method = COALESCE(?, generation_method),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(abilities_json)
        .bind(method.map(|m| m.as_str()))
        .bind(updated_at.to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("update_abilities", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", id));
        }
        Ok(())
    }
}

// =============================================================================
// Reference tables
// =============================================================================

/// One table per reference kind, each keyed by slug.
pub struct SqliteReferenceRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteReferenceRepo {
    pub async fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        for kind in ReferenceKind::ALL {
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    slug TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    document_slug TEXT,
                    data_json TEXT NOT NULL,
                    imported_at TEXT NOT NULL
                )
                "#,
                kind.table_name()
            );
            sqlx::query(&ddl)
                .execute(&pool)
                .await
                .map_err(|e| RepoError::database("reference_schema", e))?;
        }

        Ok(Self { pool, clock })
    }

    pub async fn get(
        &self,
        kind: ReferenceKind,
        slug: &str,
    ) -> Result<Option<ReferenceRow>, RepoError> {
        let query = format!(
            "SELECT slug, name, document_slug, data_json FROM {} WHERE slug = ?",
            kind.table_name()
        );
        let row = sqlx::query(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_reference", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let data_json: String = column(&row, "data_json")?;
        Ok(Some(ReferenceRow {
            slug: column(&row, "slug")?,
            name: column(&row, "name")?,
            document_slug: column(&row, "document_slug")?,
            data: serde_json::from_str(&data_json).map_err(RepoError::serialization)?,
        }))
    }
}

#[async_trait]
impl ReferenceRepo for SqliteReferenceRepo {
    async fn upsert_batch(
        &self,
        kind: ReferenceKind,
        rows: &[ReferenceRow],
    ) -> Result<usize, RepoError> {
        let now = self.clock.now().to_rfc3339();
        let statement = format!(
            r#"
            INSERT INTO {} (slug, name, document_slug, data_json, imported_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                name = excluded.name,
                document_slug = excluded.document_slug,
                data_json = excluded.data_json,
                imported_at = excluded.imported_at
            "#,
            kind.table_name()
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("upsert_reference", e))?;

        for row in rows {
            let data_json = serde_json::to_string(&row.data).map_err(RepoError::serialization)?;
            sqlx::query(&statement)
                .bind(&row.slug)
                .bind(&row.name)
                .bind(row.document_slug.as_deref())
                .bind(data_json)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("upsert_reference", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("upsert_reference", e))?;

        Ok(rows.len())
    }

    async fn count(&self, kind: ReferenceKind) -> Result<usize, RepoError> {
        let query = format!("SELECT COUNT(*) AS total FROM {}", kind.table_name());
        let row = sqlx::query(&query)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_reference", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(usize::try_from(total).unwrap_or(0))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn column<'r, T>(row: &'r SqliteRow, name: &'static str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("{}: {}", name, e)))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(RepoError::serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use charforge_domain::Ability;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    async fn pool_in(dir: &tempfile::TempDir) -> SqlitePool {
        let path = dir.path().join("charforge.db");
        connect(&path.to_string_lossy()).await.expect("connect")
    }

    #[tokio::test]
    async fn character_round_trips_through_sqlite() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = SqliteCharacterRepo::new(pool_in(&dir).await)
            .await
            .expect("repo");

        let mut record = CharacterRecord::new("Brenna", at(9))
            .expect("valid name")
            .with_species(Species::new("Half-Orc").with_subspecies_bonus(Ability::Str, 1))
            .with_class_name("Fighter");
        record.set_abilities(
            AbilityScores::from_bases([15, 14, 13, 12, 10, 8]),
            Some(GenerationMethod::StandardArray),
            at(10),
        );
        repo.save(&record).await.expect("save");

        let loaded = repo
            .get(record.id())
            .await
            .expect("get")
            .expect("record exists");
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn update_abilities_keeps_method_when_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = SqliteCharacterRepo::new(pool_in(&dir).await)
            .await
            .expect("repo");
        let record = CharacterRecord::new("Brenna", at(9)).expect("valid name");
        repo.save(&record).await.expect("save");

        let abilities = AbilityScores::from_bases([15, 15, 14, 8, 8, 8]);
        repo.update_abilities(record.id(), &abilities, Some(GenerationMethod::PointBuy), at(10))
            .await
            .expect("update with method");
        repo.update_abilities(record.id(), &abilities, None, at(11))
            .await
            .expect("update without method");

        let loaded = repo
            .get(record.id())
            .await
            .expect("get")
            .expect("record exists");
        assert_eq!(loaded.generation_method(), Some(GenerationMethod::PointBuy));
        assert_eq!(loaded.updated_at(), at(11));
        assert_eq!(loaded.abilities().bases(), [15, 15, 14, 8, 8, 8]);
    }

    #[tokio::test]
    async fn update_missing_character_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = SqliteCharacterRepo::new(pool_in(&dir).await)
            .await
            .expect("repo");
        let err = repo
            .update_abilities(CharacterId::new(), &AbilityScores::new(), None, at(9))
            .await
            .expect_err("missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn legacy_abilities_without_touched_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let pool = pool_in(&dir).await;
        let repo = SqliteCharacterRepo::new(pool.clone()).await.expect("repo");

        let id = Uuid::new_v4();
        let legacy = serde_json::json!({
            "str": {"base": 14, "bonus": 0, "total": 14},
            "dex": {"base": 10, "bonus": 0, "total": 10},
            "con": {"base": 10, "bonus": 0, "total": 10},
            "int": {"base": 10, "bonus": 0, "total": 10},
            "wis": {"base": 10, "bonus": 0, "total": 10},
            "cha": {"base": 10, "bonus": 0, "total": 10}
        });
        sqlx::query(
            "INSERT INTO characters (id, name, level, abilities_json, created_at, updated_at) VALUES (?, ?, 1, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind("Legacy")
        .bind(legacy.to_string())
        .bind(at(9).to_rfc3339())
        .bind(at(9).to_rfc3339())
        .execute(&pool)
        .await
        .expect("insert legacy row");

        let loaded = repo
            .get(CharacterId::from_uuid(id))
            .await
            .expect("get")
            .expect("record exists");
        assert_eq!(loaded.generation_method(), None);
        assert!(loaded.abilities().get(Ability::Str).is_touched());
        assert!(!loaded.abilities().get(Ability::Dex).is_touched());
    }

    #[tokio::test]
    async fn list_and_delete() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = SqliteCharacterRepo::new(pool_in(&dir).await)
            .await
            .expect("repo");
        let first = CharacterRecord::new("First", at(8)).expect("valid name");
        let second = CharacterRecord::new("Second", at(9)).expect("valid name");
        repo.save(&first).await.expect("save");
        repo.save(&second).await.expect("save");

        let listed = repo.list().await.expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name(), "Second");

        assert!(repo.delete(first.id()).await.expect("delete"));
        assert!(!repo.delete(first.id()).await.expect("delete again"));
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn reference_upsert_is_keyed_by_slug() {
        let dir = tempfile::tempdir().expect("tempdir");
        let clock: Arc<dyn ClockPort> = Arc::new(FixedClock(at(12)));
        let repo = SqliteReferenceRepo::new(pool_in(&dir).await, clock)
            .await
            .expect("repo");

        let rows: Vec<ReferenceRow> = (0..3)
            .map(|i| ReferenceRow {
                slug: format!("item-{}", i),
                name: format!("Item {}", i),
                document_slug: None,
                data: serde_json::json!({"type": "weapon"}),
            })
            .collect();
        assert_eq!(
            repo.upsert_batch(ReferenceKind::Equipment, &rows)
                .await
                .expect("upsert"),
            3
        );

        let mut renamed = rows[0].clone();
        renamed.name = "Renamed".to_string();
        renamed.document_slug = Some("wotc-srd".to_string());
        repo.upsert_batch(ReferenceKind::Equipment, &[renamed])
            .await
            .expect("upsert again");

        assert_eq!(repo.count(ReferenceKind::Equipment).await.expect("count"), 3);
        assert_eq!(repo.count(ReferenceKind::Spells).await.expect("count"), 0);

        let stored = repo
            .get(ReferenceKind::Equipment, "item-0")
            .await
            .expect("get")
            .expect("row exists");
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.document_slug.as_deref(), Some("wotc-srd"));
        assert_eq!(stored.data["type"], "weapon");
    }
}
