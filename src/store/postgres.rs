//! PostgreSQL record store
//!
//! All collections share the `documents` table; each record is a JSONB
//! column. Filters compile to JSONB containment so equality on top-level
//! fields can use the GIN index.

use serde_json::Value;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{Record, StoreError, ID_FIELD};

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Json<Record>,
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub(super) async fn insert(&self, collection: &str, record: &Record) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query("INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Json(record))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    pub(super) async fn find(
        &self,
        collection: &str,
        filter: &Record,
        limit: usize,
    ) -> Result<Vec<Record>, StoreError> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND data @> $2
            ORDER BY seq
            LIMIT $3
            "#,
        )
        .bind(collection)
        .bind(Json(filter))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut record = row.data.0;
                record.insert(ID_FIELD.to_string(), Value::String(row.id.to_string()));
                record
            })
            .collect())
    }

    pub(super) async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    pub(super) async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
