use crate::error::ShortenerError;
use crate::repository::UrlRecord;
use crate::short_id::ShortId;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates and stores a URL, returning its record.
    /// Repeated calls with the same URL string return the same record.
    async fn shorten(&self, original_url: &str) -> Result<UrlRecord>;

    /// Maps an identifier back to its record for redirection.
    /// Returns `None` if the identifier was never assigned.
    async fn resolve(&self, id: ShortId) -> Result<Option<UrlRecord>>;
}
