//! Database connection management

use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Settings;
use crate::store::{DocumentStore, MemoryStore, PgStore};

const MEMORY_URL_SCHEME: &str = "memory://";

/// Create a PostgreSQL connection pool.
///
/// The pool connects lazily: an unreachable server does not prevent startup,
/// it surfaces on the first query instead.
pub fn create_pool(database_url: &str, settings: &Settings) -> Result<PgPool> {
    let mut connect_options = PgConnectOptions::from_str(database_url)
        .context("Invalid DATABASE_URL")?
        .application_name("drawing-intel-backend");

    if let Some(name) = &settings.database_name {
        connect_options = connect_options.database(name);
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy_with(connect_options);

    tracing::info!(
        max_connections = settings.database_max_connections,
        "Database connection pool configured"
    );

    Ok(pool)
}

/// Open the record store described by the settings.
///
/// Returns `None` when no `DATABASE_URL` is configured.
pub async fn open_store(settings: &Settings) -> Result<Option<DocumentStore>> {
    let Some(url) = settings.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set - storage-backed endpoints are disabled");
        return Ok(None);
    };

    if url.starts_with(MEMORY_URL_SCHEME) {
        tracing::info!("Using in-memory record store");
        return Ok(Some(DocumentStore::Memory(MemoryStore::new())));
    }

    let store = PgStore::new(create_pool(url, settings)?);
    match store.migrate().await {
        Ok(()) => tracing::info!("Database migrations applied"),
        Err(e) => tracing::warn!(error = %e, "Failed to apply migrations - will retry on next start"),
    }

    Ok(Some(DocumentStore::Postgres(store)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_url_yields_no_store() {
        let mut settings = Settings::for_tests("/tmp");
        settings.database_url = None;
        assert!(open_store(&settings).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn memory_url_selects_memory_backend() {
        let settings = Settings::for_tests("/tmp");
        let store = open_store(&settings).await.unwrap().unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn malformed_postgres_url_is_rejected() {
        let settings = Settings::for_tests("/tmp");
        assert!(create_pool("not a url", &settings).is_err());
    }
}
