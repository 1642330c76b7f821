//! Reference data import.
//!
//! Pulls Open5e records for one reference kind, converts them to rows and
//! upserts them by slug in fixed-size batches.

mod error;

pub use error::ImportError;

use std::sync::Arc;

use serde::Serialize;

use crate::infrastructure::config::DEFAULT_IMPORT_BATCH_SIZE;
use crate::infrastructure::importers::transform;
use crate::infrastructure::ports::{ReferenceKind, ReferenceRepo, ReferenceRow, ReferenceSource};

/// Outcome of one import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub kind: ReferenceKind,
    /// Raw records read from the source.
    pub fetched: usize,
    /// Rows written to the reference table.
    pub imported: usize,
    /// Records dropped because they could not be converted.
    pub skipped: usize,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        format!(
            "Successfully populated {} {}",
            self.imported,
            self.kind.summary_noun()
        )
    }
}

pub struct ReferenceImportUseCase {
    source: Arc<dyn ReferenceSource>,
    repo: Arc<dyn ReferenceRepo>,
    batch_size: usize,
}

impl ReferenceImportUseCase {
    /// A `batch_size` below 1 falls back to the default of 100.
    pub fn new(
        source: Arc<dyn ReferenceSource>,
        repo: Arc<dyn ReferenceRepo>,
        batch_size: usize,
    ) -> Self {
        let batch_size = if batch_size < 1 {
            DEFAULT_IMPORT_BATCH_SIZE
        } else {
            batch_size
        };
        Self {
            source,
            repo,
            batch_size,
        }
    }

    pub async fn execute(&self, kind: ReferenceKind) -> Result<ImportSummary, ImportError> {
        tracing::info!(kind = %kind, "Starting reference import");

        let mut fetched = 0;
        let mut skipped = 0;
        let mut failed_feeds = 0;
        let mut rows: Vec<ReferenceRow> = Vec::new();

        for &feed in kind.feeds() {
            let records = match self.source.fetch_feed(feed).await {
                Ok(records) => records,
                Err(e) if kind.tolerates_feed_failure() => {
                    tracing::warn!(kind = %kind, feed = %feed, error = %e, "Skipping failed feed");
                    failed_feeds += 1;
                    continue;
                }
                Err(source) => return Err(ImportError::Fetch { feed, source }),
            };

            tracing::info!(feed = %feed, records = records.len(), "Fetched feed");
            fetched += records.len();

            for record in records {
                match transform(feed, record) {
                    Ok(row) => rows.push(row),
                    Err(reason) => {
                        tracing::warn!(feed = %feed, reason = %reason, "Skipping record");
                        skipped += 1;
                    }
                }
            }
        }

        if failed_feeds > 0 && failed_feeds == kind.feeds().len() {
            return Err(ImportError::NothingFetched(kind));
        }

        let total_batches = rows.len().div_ceil(self.batch_size);
        let mut imported = 0;
        for (index, batch) in rows.chunks(self.batch_size).enumerate() {
            let batch_number = index + 1;
            let written = self
                .repo
                .upsert_batch(kind, batch)
                .await
                .map_err(|source| ImportError::Upsert {
                    kind,
                    batch: batch_number,
                    source,
                })?;
            imported += written;
            tracing::info!(
                kind = %kind,
                batch = batch_number,
                total_batches,
                imported,
                "Inserted batch"
            );
        }

        let summary = ImportSummary {
            kind,
            fetched,
            imported,
            skipped,
        };
        tracing::info!(kind = %kind, fetched, imported, skipped, "Reference import complete");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryReferenceRepo;
    use crate::infrastructure::ports::{
        MockReferenceRepo, MockReferenceSource, ReferenceFeed, RepoError, SourceError,
    };
    use mockall::predicate::*;
    use mockall::Sequence;
    use serde_json::{json, Value};

    fn spells(count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| json!({ "slug": format!("spell-{i}"), "name": format!("Spell {i}") }))
            .collect()
    }

    #[tokio::test]
    async fn imports_in_batches_of_batch_size() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_feed()
            .with(eq(ReferenceFeed::Spells))
            .returning(|_| Ok(spells(250)));

        let mut repo = MockReferenceRepo::new();
        let mut seq = Sequence::new();
        for size in [100usize, 100, 50] {
            repo.expect_upsert_batch()
                .withf(move |kind, rows| *kind == ReferenceKind::Spells && rows.len() == size)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_, rows| Ok(rows.len()));
        }

        let use_case = ReferenceImportUseCase::new(Arc::new(source), Arc::new(repo), 100);
        let summary = use_case
            .execute(ReferenceKind::Spells)
            .await
            .expect("import");

        assert_eq!(summary.fetched, 250);
        assert_eq!(summary.imported, 250);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.message(), "Successfully populated 250 spells");
    }

    #[tokio::test]
    async fn failing_batch_aborts_import() {
        let mut source = MockReferenceSource::new();
        source.expect_fetch_feed().returning(|_| Ok(spells(250)));

        let mut repo = MockReferenceRepo::new();
        let mut seq = Sequence::new();
        repo.expect_upsert_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, rows| Ok(rows.len()));
        repo.expect_upsert_batch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(RepoError::database("upsert_batch", "constraint failed")));

        let use_case = ReferenceImportUseCase::new(Arc::new(source), Arc::new(repo), 100);
        let err = use_case
            .execute(ReferenceKind::Spells)
            .await
            .expect_err("second batch fails");

        assert!(matches!(err, ImportError::Upsert { batch: 2, .. }));
    }

    #[tokio::test]
    async fn failed_single_feed_aborts() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_feed()
            .returning(|feed| Err(SourceError::FeedNotFound(feed.to_string())));
        let mut repo = MockReferenceRepo::new();
        repo.expect_upsert_batch().never();

        let use_case = ReferenceImportUseCase::new(Arc::new(source), Arc::new(repo), 100);
        let err = use_case
            .execute(ReferenceKind::Races)
            .await
            .expect_err("no races");
        assert!(matches!(
            err,
            ImportError::Fetch {
                feed: ReferenceFeed::Races,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn equipment_survives_one_failed_feed() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_feed()
            .with(eq(ReferenceFeed::MagicItems))
            .returning(|_| Ok(vec![json!({ "slug": "bag-of-holding", "name": "Bag of Holding" })]));
        source
            .expect_fetch_feed()
            .with(eq(ReferenceFeed::Weapons))
            .returning(|_| {
                Err(SourceError::Read {
                    feed: "weapons".to_string(),
                    message: "permission denied".to_string(),
                })
            });
        source
            .expect_fetch_feed()
            .with(eq(ReferenceFeed::Armor))
            .returning(|_| Ok(vec![json!({ "slug": "plate", "name": "Plate", "ac_base": 18 })]));

        let repo = Arc::new(InMemoryReferenceRepo::new());
        let use_case = ReferenceImportUseCase::new(Arc::new(source), repo.clone(), 100);
        let summary = use_case
            .execute(ReferenceKind::Equipment)
            .await
            .expect("partial import");

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.message(), "Successfully populated 2 equipment items");
        assert_eq!(
            repo.get(ReferenceKind::Equipment, "plate")
                .map(|row| row.data["type"].clone()),
            Some(json!("armor"))
        );
    }

    #[tokio::test]
    async fn equipment_with_every_feed_failing_is_an_error() {
        let mut source = MockReferenceSource::new();
        source
            .expect_fetch_feed()
            .returning(|feed| Err(SourceError::FeedNotFound(feed.to_string())));

        let use_case = ReferenceImportUseCase::new(
            Arc::new(source),
            Arc::new(InMemoryReferenceRepo::new()),
            100,
        );
        let err = use_case
            .execute(ReferenceKind::Equipment)
            .await
            .expect_err("nothing fetched");
        assert!(matches!(
            err,
            ImportError::NothingFetched(ReferenceKind::Equipment)
        ));
    }

    #[tokio::test]
    async fn unconvertible_records_are_skipped() {
        let mut source = MockReferenceSource::new();
        source.expect_fetch_feed().returning(|_| {
            Ok(vec![
                json!({ "slug": "acolyte", "name": "Acolyte" }),
                json!({ "name": "No Slug" }),
                json!(42),
            ])
        });

        let repo = Arc::new(InMemoryReferenceRepo::new());
        let use_case = ReferenceImportUseCase::new(Arc::new(source), repo.clone(), 0);
        let summary = use_case
            .execute(ReferenceKind::Backgrounds)
            .await
            .expect("import");

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(
            repo.count(ReferenceKind::Backgrounds).await.expect("count"),
            1
        );
    }
}
