//! Draft document generation
//!
//! Aggregates a project's extraction items into a draft and persists it.
//! Every call stores a new draft; earlier drafts are left untouched.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::instrument;

use crate::domain::{DocType, DocumentDraft, GenerateDocumentResponse, KIND_BOM, KIND_TAG};
use crate::error::ApiResult;
use crate::store::{collections, filter_by, DocumentStore, Record};

/// Upper bound on extraction items read per generation.
pub const SOURCE_ITEM_LIMIT: usize = 5000;

/// Fetch, aggregate, persist.
#[instrument(skip(store))]
pub async fn generate_document(
    store: &DocumentStore,
    project_id: &str,
    doc_type: DocType,
) -> ApiResult<GenerateDocumentResponse> {
    let items = match doc_type {
        DocType::TagIndex | DocType::Bom => {
            store
                .get_documents(
                    collections::EXTRACTION_ITEM,
                    &filter_by(&[("project_id", Some(project_id))]),
                    SOURCE_ITEM_LIMIT,
                )
                .await?
        }
        DocType::Summary => Vec::new(),
    };

    let document = build_draft(project_id, doc_type, &items);
    let document_id = store
        .create_document(collections::DOCUMENT_DRAFT, &document)
        .await?;

    tracing::info!(
        project_id,
        document_id = %document_id,
        doc_type = %doc_type,
        source_items = items.len(),
        rows = document.items.len(),
        "Draft document generated"
    );

    Ok(GenerateDocumentResponse {
        document_id,
        document,
    })
}

/// Aggregate extraction records into a draft of the requested type.
pub fn build_draft(project_id: &str, doc_type: DocType, items: &[Record]) -> DocumentDraft {
    let (rows, meta) = match doc_type {
        DocType::TagIndex => tag_index(items),
        DocType::Bom => bill_of_materials(items),
        DocType::Summary => (Vec::new(), Record::new()),
    };

    DocumentDraft {
        project_id: project_id.to_string(),
        doc_type,
        title: doc_type.title().to_string(),
        items: rows,
        meta,
    }
}

/// Distinct tag labels, sorted.
fn tag_index(items: &[Record]) -> (Vec<Record>, Record) {
    let tags: BTreeSet<&str> = labels_of_kind(items, KIND_TAG).collect();

    let rows: Vec<Record> = tags
        .into_iter()
        .map(|tag| row([("tag", Value::from(tag))]))
        .collect();
    let meta = row([("count", Value::from(rows.len()))]);
    (rows, meta)
}

/// Occurrence count per BOM label, sorted by label.
fn bill_of_materials(items: &[Record]) -> (Vec<Record>, Record) {
    let mut parts: BTreeMap<&str, u64> = BTreeMap::new();
    for label in labels_of_kind(items, KIND_BOM) {
        *parts.entry(label).or_default() += 1;
    }

    let rows: Vec<Record> = parts
        .into_iter()
        .map(|(item, qty)| row([("item", Value::from(item)), ("qty", Value::from(qty))]))
        .collect();
    let meta = row([("line_items", Value::from(rows.len()))]);
    (rows, meta)
}

/// Non-empty string labels of items whose `kind` matches.
fn labels_of_kind<'a>(items: &'a [Record], kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    items
        .iter()
        .filter(move |item| item.get("kind").and_then(Value::as_str) == Some(kind))
        .filter_map(|item| item.get("label").and_then(Value::as_str))
        .filter(|label| !label.is_empty())
}

fn row<const N: usize>(fields: [(&str, Value); N]) -> Record {
    fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn item(kind: &str, label: Value) -> Record {
        json!({"project_id": "p1", "upload_id": "u1", "kind": kind, "label": label})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn tag_index_dedupes_and_sorts() {
        let items = vec![
            item("tag", json!("V203")),
            item("tag", json!("P-101")),
            item("tag", json!("P-101")),
        ];

        let draft = build_draft("p1", DocType::TagIndex, &items);

        assert_eq!(draft.title, "Tag Index (Draft)");
        assert_eq!(
            serde_json::to_value(&draft.items).unwrap(),
            json!([{"tag": "P-101"}, {"tag": "V203"}])
        );
        assert_eq!(draft.meta["count"], json!(2));
    }

    #[test]
    fn tag_index_ignores_other_kinds_and_blank_labels() {
        let items = vec![
            item("tag", json!("")),
            item("tag", Value::Null),
            item("bom", json!("Gate valve")),
            item("tag", json!("LT-101A")),
        ];

        let draft = build_draft("p1", DocType::TagIndex, &items);
        assert_eq!(
            serde_json::to_value(&draft.items).unwrap(),
            json!([{"tag": "LT-101A"}])
        );
        assert_eq!(draft.meta["count"], json!(1));
    }

    #[test]
    fn bom_without_bom_items_is_empty() {
        let items = vec![item("tag", json!("P-101"))];

        let draft = build_draft("p1", DocType::Bom, &items);
        assert!(draft.items.is_empty());
        assert_eq!(draft.meta["line_items"], json!(0));
        assert_eq!(draft.title, "Bill of Materials (Draft)");
    }

    #[test]
    fn bom_counts_occurrences_per_label() {
        let items = vec![
            item("bom", json!("Gate valve")),
            item("bom", json!("Flange")),
            item("bom", json!("Gate valve")),
        ];

        let draft = build_draft("p1", DocType::Bom, &items);
        assert_eq!(
            serde_json::to_value(&draft.items).unwrap(),
            json!([{"item": "Flange", "qty": 1}, {"item": "Gate valve", "qty": 2}])
        );
        assert_eq!(draft.meta["line_items"], json!(2));
    }

    #[test]
    fn summary_is_an_empty_placeholder() {
        let items = vec![item("tag", json!("P-101"))];

        let draft = build_draft("p1", DocType::Summary, &items);
        assert!(draft.items.is_empty());
        assert!(draft.meta.is_empty());
        assert_eq!(draft.title, "Transmittal Summary (Draft)");
    }

    #[tokio::test]
    async fn each_generation_stores_a_new_draft() {
        let store = DocumentStore::Memory(MemoryStore::new());

        let first = generate_document(&store, "p1", DocType::Summary).await.unwrap();
        let second = generate_document(&store, "p1", DocType::Summary).await.unwrap();
        assert_ne!(first.document_id, second.document_id);

        let drafts = store
            .get_documents(collections::DOCUMENT_DRAFT, &Record::new(), 10)
            .await
            .unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0]["doc_type"], json!("summary"));
    }

    #[tokio::test]
    async fn generation_reads_only_the_requested_project() {
        let store = DocumentStore::Memory(MemoryStore::new());
        for (project, label) in [("p1", "P-101"), ("p2", "V203")] {
            let mut record = item("tag", json!(label));
            record.insert("project_id".to_string(), json!(project));
            store
                .create_document(collections::EXTRACTION_ITEM, &record)
                .await
                .unwrap();
        }

        let resp = generate_document(&store, "p1", DocType::TagIndex).await.unwrap();
        assert_eq!(
            serde_json::to_value(&resp.document.items).unwrap(),
            json!([{"tag": "P-101"}])
        );
    }

    #[tokio::test]
    async fn tag_index_reads_only_the_first_items_inserted() {
        let store = DocumentStore::Memory(MemoryStore::new());
        let total = SOURCE_ITEM_LIMIT + 3;
        // Inserted in descending label order: the three items past the cap
        // carry the smallest labels.
        for n in (0..total).rev() {
            store
                .create_document(
                    collections::EXTRACTION_ITEM,
                    &item("tag", json!(format!("TAG{n:05}"))),
                )
                .await
                .unwrap();
        }

        let resp = generate_document(&store, "p1", DocType::TagIndex).await.unwrap();
        let rows = &resp.document.items;

        assert_eq!(resp.document.meta["count"], json!(SOURCE_ITEM_LIMIT));
        assert_eq!(rows.len(), SOURCE_ITEM_LIMIT);
        assert_eq!(rows[0]["tag"], json!("TAG00003"));
        assert_eq!(rows[SOURCE_ITEM_LIMIT - 1]["tag"], json!("TAG05002"));
        assert!(!rows
            .iter()
            .any(|row| ["TAG00000", "TAG00001", "TAG00002"].contains(&row["tag"].as_str().unwrap())));
    }
}
