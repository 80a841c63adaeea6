use crate::validator::UrlValidator;
use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{Repository, ShortId, Shortener, ShortenerError, UrlRecord};
use tracing::{debug, info, trace};

type Result<T> = std::result::Result<T, ShortenerError>;

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository` and a `UrlValidator` to handle:
/// - validation (syntax, scheme, host reachability) before anything is
///   stored
/// - deduplication by exact URL string
/// - identifier assignment, delegated to the repository
#[derive(Debug)]
pub struct ShortenerService<R, V> {
    repository: Arc<R>,
    validator: Arc<V>,
}

// Not derived: the fields are shared handles, so cloning must not
// require `R: Clone` or `V: Clone`.
impl<R, V> Clone for ShortenerService<R, V> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<R: Repository, V: UrlValidator> ShortenerService<R, V> {
    /// Creates a new `ShortenerService` over the given backend and
    /// validation policy.
    pub fn new(repository: R, validator: V) -> Self {
        Self {
            repository: Arc::new(repository),
            validator: Arc::new(validator),
        }
    }
}

#[async_trait]
impl<R: Repository, V: UrlValidator> Shortener for ShortenerService<R, V> {
    async fn shorten(&self, original_url: &str) -> Result<UrlRecord> {
        // No repository lock is held while the validator suspends on its
        // DNS lookup; other requests keep making progress.
        if !self.validator.validate(original_url).await {
            return Err(ShortenerError::InvalidUrl(original_url.to_owned()));
        }

        if let Some(existing) = self.repository.find_by_url(original_url).await? {
            debug!(id = %existing.id, "reusing existing record");
            return Ok(existing);
        }

        // `insert` re-checks for the URL under the repository lock, so
        // two concurrent shortens of the same URL still yield one record.
        let record = self.repository.insert(original_url).await?;
        info!(id = %record.id, url = %record.original_url, "created short url");
        Ok(record)
    }

    async fn resolve(&self, id: ShortId) -> Result<Option<UrlRecord>> {
        trace!(%id, "resolving short url");
        Ok(self.repository.find_by_id(id).await?)
    }
}
