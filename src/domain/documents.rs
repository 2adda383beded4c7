use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::Record;

/// Kind of generated draft document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DocType {
    TagIndex,
    Bom,
    Summary,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TagIndex => "tag-index",
            Self::Bom => "bom",
            Self::Summary => "summary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::TagIndex => "Tag Index (Draft)",
            Self::Bom => "Bill of Materials (Draft)",
            Self::Summary => "Transmittal Summary (Draft)",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported doc_type")]
pub struct UnsupportedDocType(pub String);

impl FromStr for DocType {
    type Err = UnsupportedDocType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tag-index" => Ok(Self::TagIndex),
            "bom" => Ok(Self::Bom),
            "summary" => Ok(Self::Summary),
            other => Err(UnsupportedDocType(other.to_string())),
        }
    }
}

/// Generated draft document as stored. Row shape depends on `doc_type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentDraft {
    pub project_id: String,
    pub doc_type: DocType,
    pub title: String,
    #[serde(default)]
    pub items: Vec<Record>,
    #[serde(default)]
    pub meta: Record,
}

/// Request DTO for draft generation. `doc_type` stays a string so that
/// unknown values get a 400 rather than a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDocumentRequest {
    pub project_id: String,
    pub doc_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDocumentResponse {
    pub document_id: String,
    pub document: DocumentDraft,
}
