use serde::{Deserialize, Serialize};

use crate::store::Record;

/// Project record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub revision: Option<String>,
    pub created_by: Option<String>,
}

/// Request DTO for creating a project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl From<CreateProjectRequest> for Project {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            name: req.name,
            code: req.code,
            description: req.description,
            revision: req.revision,
            created_by: req.created_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Record>,
}
