//! Extraction domain types
//!
//! One `ExtractionItem` is a unit of heuristically derived information about
//! an uploaded file. Items are stored as-is, duplicates included.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Record;

/// Item kind produced for filename tag matches.
pub const KIND_TAG: &str = "tag";
/// Item kind aggregated by the bill-of-materials draft.
pub const KIND_BOM: &str = "bom";

/// Confidence assigned to tags scraped from a filename.
pub const FILENAME_TAG_CONFIDENCE: f64 = 0.4;

/// Extraction item record as stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionItem {
    pub project_id: String,
    pub upload_id: String,
    pub kind: String,
    pub label: String,
    #[serde(default)]
    pub attributes: Record,
    pub page: Option<i64>,
    pub confidence: Option<f64>,
}

impl ExtractionItem {
    /// A tag found in the filename of an upload.
    pub fn filename_tag(project_id: &str, upload_id: &str, label: impl Into<String>) -> Self {
        let mut attributes = Record::new();
        attributes.insert("source".to_string(), Value::String("filename".to_string()));

        Self {
            project_id: project_id.to_string(),
            upload_id: upload_id.to_string(),
            kind: KIND_TAG.to_string(),
            label: label.into(),
            attributes,
            page: None,
            confidence: Some(FILENAME_TAG_CONFIDENCE),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionListResponse {
    pub items: Vec<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filename_tag_serializes_with_null_page() {
        let item = ExtractionItem::filename_tag("p1", "u1", "P-101");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            json!({
                "project_id": "p1",
                "upload_id": "u1",
                "kind": "tag",
                "label": "P-101",
                "attributes": {"source": "filename"},
                "page": null,
                "confidence": 0.4,
            })
        );
    }
}
