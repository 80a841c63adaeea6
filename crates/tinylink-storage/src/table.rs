use std::collections::BTreeMap;
use tinylink_core::{ShortId, UrlRecord};

/// The mapping between identifiers and original URLs, plus the next
/// identifier to assign.
///
/// Both repository backends wrap a `UrlTable` behind a single mutex, so
/// the check-assign sequence in [`insert`](UrlTable::insert) is one
/// critical section; the durable backend additionally serializes the
/// table to disk through [`to_map`](UrlTable::to_map).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrlTable {
    records: BTreeMap<ShortId, String>,
    next_id: ShortId,
}

impl UrlTable {
    pub(crate) fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: ShortId::FIRST,
        }
    }

    /// Rebuilds a table from the persisted stringified-id -> url map.
    ///
    /// Keys that are not positive decimal integers are skipped. The next
    /// identifier is one past the highest stored id, so identifiers are
    /// never reused across restarts.
    pub(crate) fn from_map(map: BTreeMap<String, String>) -> Self {
        let records: BTreeMap<ShortId, String> = map
            .into_iter()
            .filter_map(|(key, url)| Some((key.parse::<ShortId>().ok()?, url)))
            .collect();

        let next_id = records
            .keys()
            .next_back()
            .map_or(ShortId::FIRST, |max| max.next());

        Self { records, next_id }
    }

    /// The persisted form: stringified id -> original url.
    pub(crate) fn to_map(&self) -> BTreeMap<String, String> {
        self.records
            .iter()
            .map(|(id, url)| (id.to_string(), url.clone()))
            .collect()
    }

    /// Exact string match scan over the stored URLs.
    pub(crate) fn find_by_url(&self, original_url: &str) -> Option<UrlRecord> {
        self.records
            .iter()
            .find(|(_, url)| url.as_str() == original_url)
            .map(|(id, url)| record(*id, url))
    }

    pub(crate) fn find_by_id(&self, id: ShortId) -> Option<UrlRecord> {
        self.records.get(&id).map(|url| record(id, url))
    }

    /// Returns the existing record for this URL, or assigns the next
    /// identifier and stores a new one. The second element is `true`
    /// when a record was created.
    pub(crate) fn insert(&mut self, original_url: &str) -> (UrlRecord, bool) {
        if let Some(existing) = self.find_by_url(original_url) {
            return (existing, false);
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.records.insert(id, original_url.to_owned());
        (record(id, original_url), true)
    }
}

fn record(id: ShortId, url: &str) -> UrlRecord {
    UrlRecord {
        id,
        original_url: url.to_owned(),
    }
}
