use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::{request_id_layer, RequestIdSpan};
use crate::routes;
use crate::services::FileStorage;
use crate::store::{DocumentStore, StoreError};

/// Shared application state
pub struct AppState {
    /// Record store; `None` when no database is configured
    pub store: Option<DocumentStore>,
    pub files: FileStorage,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Option<DocumentStore>, settings: Settings) -> Arc<Self> {
        Arc::new(Self {
            store,
            files: FileStorage::new(settings.storage_dir.clone()),
            settings,
        })
    }

    /// The record store, or an error when none is configured.
    pub fn store(&self) -> Result<&DocumentStore, StoreError> {
        self.store.as_ref().ok_or(StoreError::NotConfigured)
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // DEBUG spans keep INFO logs to one line per operation
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(RequestIdSpan)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    let max_body = state.settings.max_upload_bytes;

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    // Credentials rule out literal wildcards, so "*" mirrors the caller instead
    let origin = if settings.allows_any_origin() {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = settings
            .cors_allow_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(max_age)
}
