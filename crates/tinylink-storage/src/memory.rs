use crate::table::UrlTable;
use crate::Result;
use async_trait::async_trait;
use tinylink_core::{Repository, ShortId, UrlRecord};
use tokio::sync::Mutex;

/// In-memory implementation of the `Repository` trait.
///
/// State lives for the process lifetime only; this is the `persist: off`
/// configuration of the service. A single mutex guards the table, which
/// keeps identifier assignment linearizable under concurrent shorten
/// calls.
#[derive(Debug)]
pub struct MemoryRepository {
    table: Mutex<UrlTable>,
}

impl MemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self {
            table: Mutex::new(UrlTable::new()),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlRecord>> {
        Ok(self.table.lock().await.find_by_url(original_url))
    }

    async fn find_by_id(&self, id: ShortId) -> Result<Option<UrlRecord>> {
        Ok(self.table.lock().await.find_by_id(id))
    }

    async fn insert(&self, original_url: &str) -> Result<UrlRecord> {
        let (record, _created) = self.table.lock().await.insert(original_url);
        Ok(record)
    }
}
