use crate::table::UrlTable;
use crate::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use tinylink_core::{Repository, ShortId, UrlRecord};
use tokio::sync::Mutex;
use tracing::{error, warn};

/// File-backed implementation of the `Repository` trait.
///
/// The whole table is kept in memory and rewritten to a single
/// pretty-printed JSON object on every insert: keys are the stringified
/// identifiers, values the original URLs. The write happens before
/// `insert` returns and while the table lock is held, so concurrent
/// inserts can never interleave their file writes.
///
/// A write failure is logged and the insert still succeeds in memory;
/// no operation on this repository is fatal to the process.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    table: Mutex<UrlTable>,
}

impl JsonFileRepository {
    /// Opens a repository backed by the given file.
    ///
    /// An absent file is a normal first run and yields an empty table; a
    /// malformed one is logged at warn level and likewise replaced by an
    /// empty table. Opening never fails.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = load_table(&path).await.unwrap_or_else(UrlTable::new);
        Self {
            path,
            table: Mutex::new(table),
        }
    }

    /// The file this repository persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Repository for JsonFileRepository {
    async fn find_by_url(&self, original_url: &str) -> Result<Option<UrlRecord>> {
        Ok(self.table.lock().await.find_by_url(original_url))
    }

    async fn find_by_id(&self, id: ShortId) -> Result<Option<UrlRecord>> {
        let mut table = self.table.lock().await;
        if let Some(record) = table.find_by_id(id) {
            return Ok(Some(record));
        }

        // The backing file may have been modified behind our back;
        // reload once and retry before reporting not-found.
        if let Some(fresh) = load_table(&self.path).await {
            *table = fresh;
        }
        Ok(table.find_by_id(id))
    }

    async fn insert(&self, original_url: &str) -> Result<UrlRecord> {
        let mut table = self.table.lock().await;
        let (record, created) = table.insert(original_url);

        if created {
            // Durability before response: the full table is written out
            // before the lock is released. On failure the record stays
            // valid in memory for the rest of the process lifetime.
            if let Err(err) = store_table(&self.path, &table).await {
                error!(
                    path = %self.path.display(),
                    error = %err,
                    "failed to persist url database; record kept in memory only"
                );
            }
        }

        Ok(record)
    }
}

/// Reads and parses the persisted table.
///
/// Returns `None` when the file cannot be used: silently for an absent
/// file, with a warning for anything else. Callers decide whether to
/// fall back to an empty table (startup) or keep what they have
/// (reload-and-retry).
async fn load_table(path: &Path) -> Option<UrlTable> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read url database");
            return None;
        }
    };

    match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
        Ok(map) => Some(UrlTable::from_map(map)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "url database is malformed");
            None
        }
    }
}

async fn store_table(path: &Path, table: &UrlTable) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(&table.to_map())?;
    tokio::fs::write(path, bytes).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn data_file(dir: &TempDir) -> PathBuf {
        dir.path().join("urls.json")
    }

    #[tokio::test]
    async fn starts_empty_without_a_file() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::open(data_file(&dir)).await;

        let record = repo.insert("https://example.com").await.unwrap();
        assert_eq!(record.id, ShortId::FIRST);
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);

        let record = {
            let repo = JsonFileRepository::open(&path).await;
            repo.insert("https://example.com/page").await.unwrap()
        };

        // Simulated restart: a fresh repository over the same file.
        let reopened = JsonFileRepository::open(&path).await;
        let found = reopened.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn ids_are_never_reused_across_restarts() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);

        let last = {
            let repo = JsonFileRepository::open(&path).await;
            repo.insert("https://example.com/a").await.unwrap();
            repo.insert("https://example.com/b").await.unwrap()
        };

        let reopened = JsonFileRepository::open(&path).await;
        let next = reopened.insert("https://example.com/c").await.unwrap();
        assert_eq!(next.id, last.id.next());
    }

    #[tokio::test]
    async fn malformed_file_resets_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let repo = JsonFileRepository::open(&path).await;
        let record = repo.insert("https://example.com").await.unwrap();
        assert_eq!(record.id, ShortId::FIRST);
    }

    #[tokio::test]
    async fn file_format_is_pretty_printed_id_to_url() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);

        let repo = JsonFileRepository::open(&path).await;
        repo.insert("https://example.com").await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("\"1\": \"https://example.com\""));
        // Pretty printing puts each entry on its own line.
        assert!(contents.contains('\n'));
    }

    #[tokio::test]
    async fn find_by_id_reloads_when_file_changed_externally() {
        let dir = TempDir::new().unwrap();
        let path = data_file(&dir);

        // Two repositories over the same file; `stale` has never seen
        // the record written through `writer`.
        let stale = JsonFileRepository::open(&path).await;
        let writer = JsonFileRepository::open(&path).await;
        let record = writer.insert("https://example.com").await.unwrap();

        let found = stale.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn find_by_id_still_none_after_reload() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::open(data_file(&dir)).await;

        let missing = repo.find_by_id(ShortId::new(5).unwrap()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn insert_survives_unwritable_path() {
        // A directory that does not exist makes every write fail; the
        // insert must still succeed in memory.
        let path = PathBuf::from("/nonexistent-tinylink-dir/urls.json");
        let repo = JsonFileRepository::open(&path).await;

        let record = repo.insert("https://example.com").await.unwrap();
        let found = repo.find_by_url("https://example.com").await.unwrap();
        assert_eq!(found.unwrap().id, record.id);
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let dir = TempDir::new().unwrap();
        let repo = Arc::new(JsonFileRepository::open(data_file(&dir)).await);
        let mut handles = vec![];

        for i in 0..16u64 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert(&format!("https://example{}.com", i))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 16);

        // Every record also made it to disk.
        let reopened = JsonFileRepository::open(repo.path()).await;
        for i in 0..16u64 {
            let url = format!("https://example{}.com", i);
            assert!(reopened.find_by_url(&url).await.unwrap().is_some());
        }
    }
}
