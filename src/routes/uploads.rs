//! Upload routes
//!
//! Multipart ingestion of drawing files and upload listing.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{ProjectFilterQuery, UploadListResponse, UploadResponse};
use crate::error::{ApiError, ApiResult};
use crate::services::uploads::ingest_upload;
use crate::store::{collections, filter_by};

/// Most uploads returned by a listing.
pub const UPLOAD_LIST_LIMIT: usize = 200;

/// POST /api/uploads
///
/// Multipart form with `project_id` followed by `file`. The file part is
/// streamed to disk as it arrives, so `project_id` must come first; parts
/// after the file are not read.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let store = state.store()?;
    let mut project_id: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("project_id") => {
                project_id = Some(field.text().await?);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::bad_request("Form field 'file' must be a file"))?;
                let project_id = project_id.ok_or_else(|| {
                    ApiError::bad_request("Form field 'project_id' must precede 'file'")
                })?;

                let stored = state.files.save_field(&filename, &mut field).await?;
                let response = ingest_upload(store, &project_id, &filename, stored).await?;
                return Ok(Json(response));
            }
            // Unknown parts are ignored
            _ => {}
        }
    }

    Err(match project_id {
        None => ApiError::bad_request("Missing form field 'project_id'"),
        Some(_) => ApiError::bad_request("Missing form field 'file'"),
    })
}

/// GET /api/uploads?project_id=
pub async fn list_uploads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectFilterQuery>,
) -> ApiResult<Json<UploadListResponse>> {
    let uploads = state
        .store()?
        .get_documents(
            collections::UPLOAD,
            &filter_by(&[("project_id", query.project_id())]),
            UPLOAD_LIST_LIMIT,
        )
        .await?;

    Ok(Json(UploadListResponse { uploads }))
}
