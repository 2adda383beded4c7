//! Schema-free record storage
//!
//! Records are open JSON objects grouped by collection name. The store assigns
//! an opaque id on insert and stamps `created_at`/`updated_at`. Two backends
//! exist: PostgreSQL (JSONB rows) and a process-local map.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// An open key/value record as it lives in storage.
pub type Record = Map<String, Value>;

/// Key under which listed records expose their storage id.
pub const ID_FIELD: &str = "_id";

/// Collection names
pub mod collections {
    pub const PROJECT: &str = "project";
    pub const UPLOAD: &str = "upload";
    pub const EXTRACTION_ITEM: &str = "extractionitem";
    pub const DOCUMENT_DRAFT: &str = "documentdraft";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database is not configured")]
    NotConfigured,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record for '{0}' is not a JSON object")]
    NotAnObject(String),
}

/// Storage handle shared by all request handlers.
#[derive(Clone)]
pub enum DocumentStore {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl DocumentStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Insert one record and return its storage id.
    pub async fn create_document<T: Serialize>(
        &self,
        collection: &str,
        record: &T,
    ) -> Result<String, StoreError> {
        let mut record = match serde_json::to_value(record)? {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject(collection.to_string())),
        };
        record.remove(ID_FIELD);

        let now = Value::String(Utc::now().to_rfc3339());
        record.insert("created_at".to_string(), now.clone());
        record.insert("updated_at".to_string(), now);

        let id = match self {
            Self::Postgres(store) => store.insert(collection, &record).await?,
            Self::Memory(store) => store.insert(collection, record),
        };

        tracing::debug!(collection, id = %id, "Record created");
        Ok(id.to_string())
    }

    /// Fetch up to `limit` records whose top-level fields equal every entry in
    /// `filter`, in insertion order. Each record carries its id under `_id`.
    pub async fn get_documents(
        &self,
        collection: &str,
        filter: &Record,
        limit: usize,
    ) -> Result<Vec<Record>, StoreError> {
        match self {
            Self::Postgres(store) => store.find(collection, filter, limit).await,
            Self::Memory(store) => Ok(store.find(collection, filter, limit)),
        }
    }

    /// Names of collections holding at least one record, sorted.
    pub async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        match self {
            Self::Postgres(store) => store.collection_names().await,
            Self::Memory(store) => Ok(store.collection_names()),
        }
    }

    /// Round-trip check against the backend.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }
}

/// Build an equality filter, skipping absent values.
pub fn filter_by(pairs: &[(&str, Option<&str>)]) -> Record {
    pairs
        .iter()
        .filter_map(|(key, value)| {
            value.map(|v| (key.to_string(), Value::String(v.to_string())))
        })
        .collect()
}

fn matches_filter(record: &Record, filter: &Record) -> bool {
    filter
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn created_records_are_stamped_and_listed_with_ids() {
        let store = DocumentStore::Memory(MemoryStore::new());
        let id = store
            .create_document(collections::PROJECT, &json!({"name": "Plant A"}))
            .await
            .unwrap();

        let records = store
            .get_documents(collections::PROJECT, &Record::new(), 10)
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0][ID_FIELD], json!(id));
        assert_eq!(records[0]["name"], json!("Plant A"));
        assert!(records[0].contains_key("created_at"));
        assert!(records[0].contains_key("updated_at"));
    }

    #[tokio::test]
    async fn non_object_records_are_rejected() {
        let store = DocumentStore::Memory(MemoryStore::new());
        let err = store
            .create_document(collections::PROJECT, &json!(["not", "an", "object"]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(_)));
    }

    #[test]
    fn filter_by_skips_absent_values() {
        let filter = filter_by(&[("project_id", Some("p1")), ("kind", None)]);
        assert_eq!(filter.len(), 1);
        assert_eq!(filter["project_id"], json!("p1"));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let record = json!({"a": 1}).as_object().cloned().unwrap();
        assert!(matches_filter(&record, &Record::new()));
        let filter = json!({"a": 2}).as_object().cloned().unwrap();
        assert!(!matches_filter(&record, &filter));
    }
}
