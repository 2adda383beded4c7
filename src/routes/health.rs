use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

/// Collections listed by the diagnostic endpoint.
const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;
/// Error text shown by the diagnostic endpoint is cut to this many chars.
const DIAGNOSTIC_ERROR_CHARS: usize = 80;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct DiagnosticResponse {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub database: String,
}

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Oil & Gas Drawing Intelligence API is running".to_string(),
    })
}

/// GET /test
///
/// Reports storage availability instead of failing when it is missing.
pub async fn diagnostics(State(state): State<Arc<AppState>>) -> Json<DiagnosticResponse> {
    let mut response = DiagnosticResponse {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Some(store) = &state.store else {
        response.database = "⚠️  Available but not initialized".to_string();
        return Json(response);
    };

    let settings = &state.settings;
    response.database = "✅ Available".to_string();
    response.database_url = Some(
        if settings.database_url.is_some() {
            "✅ Set"
        } else {
            "❌ Not Set"
        }
        .to_string(),
    );
    response.database_name = Some(
        settings
            .database_name
            .clone()
            .unwrap_or_else(|| "❌ Not Set".to_string()),
    );

    match store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(DIAGNOSTIC_COLLECTION_LIMIT);
            response.collections = names;
            response.database = "✅ Connected & Working".to_string();
            response.connection_status = "Connected".to_string();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Diagnostic collection listing failed");
            response.database = format!("⚠️  Connected but Error: {}", truncate_chars(&e.to_string()));
        }
    }

    Json(response)
}

/// GET /health
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, database) = match &state.store {
        None => ("degraded", "not_configured"),
        Some(store) => match store.ping().await {
            Ok(()) => ("healthy", "ok"),
            Err(e) => {
                tracing::warn!(error = %e, backend = store.backend_name(), "Database health check failed");
                ("unhealthy", "error")
            }
        },
    };

    // Return 503 only when a configured store is down
    let status_code = if status == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services: ServiceHealth {
                database: database.to_string(),
            },
        }),
    )
}

fn truncate_chars(text: &str) -> String {
    text.chars().take(DIAGNOSTIC_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(200);
        assert_eq!(truncate_chars(&long).chars().count(), DIAGNOSTIC_ERROR_CHARS);
        assert_eq!(truncate_chars("short"), "short");
    }
}
