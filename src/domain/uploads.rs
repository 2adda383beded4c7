use serde::{Deserialize, Serialize};
use std::fmt;

use crate::store::Record;

/// Drawing file type, derived from the filename extension
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Dxf,
    Dwg,
    Tiff,
    Step,
    Ifc,
    Obj,
    Nwd,
    Nwc,
    Other,
}

impl FileType {
    /// Classify by the text after the last `.` (the whole name if there is
    /// none), case-insensitively. Unknown extensions map to `Other`.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename.rsplit('.').next().unwrap_or(filename);
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "dxf" => Self::Dxf,
            "dwg" => Self::Dwg,
            "tiff" | "tif" => Self::Tiff,
            "step" | "stp" => Self::Step,
            "ifc" => Self::Ifc,
            "obj" => Self::Obj,
            "nwd" => Self::Nwd,
            "nwc" => Self::Nwc,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Dxf => "dxf",
            Self::Dwg => "dwg",
            Self::Tiff => "tiff",
            Self::Step => "step",
            Self::Ifc => "ifc",
            Self::Obj => "obj",
            Self::Nwd => "nwd",
            Self::Nwc => "nwc",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Upload {
    pub project_id: String,
    pub filename: String,
    pub filepath: String,
    pub filetype: FileType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub upload_id: String,
    pub filetype: FileType,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadListResponse {
    pub uploads: Vec<Record>,
}

/// Optional project filter shared by list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilterQuery {
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ProjectFilterQuery {
    /// The project id, treating an empty value as absent.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }
}
