use crate::error::StorageError;
use crate::short_id::ShortId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored URL mapping.
///
/// Records are immutable after creation and never deleted; the original
/// URL is kept byte-for-byte as submitted, with no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The identifier assigned when the URL was first shortened.
    pub id: ShortId,
    /// The original URL that was shortened.
    pub original_url: String,
}

/// The process-wide mapping between identifiers and original URLs.
///
/// Implementations serialize the check-assign-persist sequence inside
/// [`insert`](Repository::insert); identifiers are never reused, even
/// across restarts of a durable backend.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Finds the record for an exact original-URL string, if any.
    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlRecord>>;

    /// Finds the record for an identifier, if any.
    async fn find_by_id(&self, id: ShortId) -> Result<Option<UrlRecord>>;

    /// Returns the existing record for this URL, or assigns the next
    /// identifier and stores a new one. Durable backends write the full
    /// state out before returning.
    async fn insert(&self, original_url: &str) -> Result<UrlRecord>;
}
