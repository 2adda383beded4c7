use axum::{extract::State, Json};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{CreateProjectRequest, CreateProjectResponse, Project, ProjectListResponse};
use crate::error::ApiResult;
use crate::store::{collections, Record};

/// Most projects returned by a listing.
pub const PROJECT_LIST_LIMIT: usize = 100;

/// POST /api/projects
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<Json<CreateProjectResponse>> {
    let store = state.store()?;
    let project = Project::from(req);

    let project_id = store.create_document(collections::PROJECT, &project).await?;

    tracing::info!(
        project_id = %project_id,
        project_name = %project.name,
        "Project created"
    );

    Ok(Json(CreateProjectResponse { project_id }))
}

/// GET /api/projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ProjectListResponse>> {
    let projects = state
        .store()?
        .get_documents(collections::PROJECT, &Record::new(), PROJECT_LIST_LIMIT)
        .await?;

    Ok(Json(ProjectListResponse { projects }))
}
