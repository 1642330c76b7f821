//! External data source ports.

use async_trait::async_trait;

use super::error::SourceError;
use super::types::ReferenceFeed;

/// Supplier of raw Open5e records, one feed at a time.
///
/// Implementations return every record of the feed; pagination, if any, is
/// the adapter's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn fetch_feed(&self, feed: ReferenceFeed) -> Result<Vec<serde_json::Value>, SourceError>;
}
