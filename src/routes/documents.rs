use axum::{extract::State, Json};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{DocType, GenerateDocumentRequest, GenerateDocumentResponse};
use crate::error::ApiResult;
use crate::services::documents;

/// POST /api/documents/generate
///
/// Unknown `doc_type` values are rejected before anything is read or written.
pub async fn generate_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateDocumentRequest>,
) -> ApiResult<Json<GenerateDocumentResponse>> {
    let doc_type: DocType = req.doc_type.parse()?;

    let response = documents::generate_document(state.store()?, &req.project_id, doc_type).await?;
    Ok(Json(response))
}
