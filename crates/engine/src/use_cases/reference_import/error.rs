//! Reference import errors.

use crate::infrastructure::ports::{ReferenceFeed, ReferenceKind, RepoError, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to fetch {feed}: {source}")]
    Fetch {
        feed: ReferenceFeed,
        #[source]
        source: SourceError,
    },

    #[error("Failed to insert {kind} batch {batch}: {source}")]
    Upsert {
        kind: ReferenceKind,
        batch: usize,
        #[source]
        source: RepoError,
    },

    #[error("No {0} data could be fetched")]
    NothingFetched(ReferenceKind),
}
