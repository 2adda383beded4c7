pub mod documents;
pub mod extractions;
pub mod health;
pub mod projects;
pub mod uploads;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Liveness and diagnostics
        .route("/", get(health::root))
        .route("/test", get(health::diagnostics))
        .route("/health", get(health::health_check))
        // Projects
        .route(
            "/api/projects",
            post(projects::create_project).get(projects::list_projects),
        )
        // Uploads
        .route(
            "/api/uploads",
            post(uploads::upload_file).get(uploads::list_uploads),
        )
        // Extraction items
        .route("/api/extractions", get(extractions::list_extractions))
        // Draft documents
        .route(
            "/api/documents/generate",
            post(documents::generate_document),
        )
}
