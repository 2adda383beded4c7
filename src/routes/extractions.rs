use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{ExtractionListResponse, ProjectFilterQuery};
use crate::error::ApiResult;
use crate::store::{collections, filter_by};

/// Most extraction items returned by a listing.
pub const EXTRACTION_LIST_LIMIT: usize = 1000;

/// GET /api/extractions?project_id=
pub async fn list_extractions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectFilterQuery>,
) -> ApiResult<Json<ExtractionListResponse>> {
    let items = state
        .store()?
        .get_documents(
            collections::EXTRACTION_ITEM,
            &filter_by(&[("project_id", query.project_id())]),
            EXTRACTION_LIST_LIMIT,
        )
        .await?;

    Ok(Json(ExtractionListResponse { items }))
}
