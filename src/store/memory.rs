//! Process-local record store
//!
//! Backs `DATABASE_URL=memory://` and the test suite. Contents are lost on
//! restart.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use super::{matches_filter, Record, ID_FIELD};

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<BTreeMap<String, Vec<(Uuid, Record)>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn insert(&self, collection: &str, record: Record) -> Uuid {
        let id = Uuid::new_v4();
        self.inner
            .write()
            .entry(collection.to_string())
            .or_default()
            .push((id, record));
        id
    }

    pub(super) fn find(&self, collection: &str, filter: &Record, limit: usize) -> Vec<Record> {
        let guard = self.inner.read();
        let Some(records) = guard.get(collection) else {
            return Vec::new();
        };

        records
            .iter()
            .filter(|(_, record)| matches_filter(record, filter))
            .take(limit)
            .map(|(id, record)| {
                let mut out = record.clone();
                out.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
                out
            })
            .collect()
    }

    pub(super) fn collection_names(&self) -> Vec<String> {
        self.inner
            .read()
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }
}
