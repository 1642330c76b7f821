//! Reference source backed by a directory of Open5e JSON dumps.
//!
//! Each feed lives in `<dir>/<feed>.json` and holds either one Open5e list
//! page (`{count, next, previous, results}`) or a bare array of records.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::open5e_types::Open5eDump;
use crate::infrastructure::ports::{ReferenceFeed, ReferenceSource, SourceError};

pub struct ReferenceDumpSource {
    data_path: PathBuf,
}

impl ReferenceDumpSource {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Read and parse one dump file by stem.
    ///
    /// The stem must not contain path separators or traversal sequences.
    pub async fn read_dump(&self, stem: &str) -> Result<Vec<Value>, SourceError> {
        if stem.is_empty() || stem.contains("..") || stem.contains('/') || stem.contains('\\') {
            return Err(SourceError::InvalidName(stem.to_string()));
        }

        let path = self.data_path.join(format!("{stem}.json"));
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::FeedNotFound(path.display().to_string()));
            }
            Err(e) => {
                return Err(SourceError::Read {
                    feed: stem.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let dump: Open5eDump =
            serde_json::from_str(&content).map_err(|e| SourceError::Parse {
                feed: stem.to_string(),
                message: e.to_string(),
            })?;

        Ok(match dump {
            Open5eDump::Page(page) => {
                if let Some(next) = page.next.as_deref() {
                    tracing::warn!(
                        feed = stem,
                        next = next,
                        count = ?page.count,
                        "Dump holds a single page of a paginated feed; later pages are not read"
                    );
                }
                page.results
            }
            Open5eDump::Records(records) => records,
        })
    }
}

#[async_trait]
impl ReferenceSource for ReferenceDumpSource {
    async fn fetch_feed(&self, feed: ReferenceFeed) -> Result<Vec<Value>, SourceError> {
        let records = self.read_dump(feed.as_str()).await?;
        tracing::debug!(feed = %feed, records = records.len(), "Read reference dump");
        Ok(records)
    }
}
