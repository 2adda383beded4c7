//! Upload ingestion: record metadata for a stored file, scan the filename for tags.

use tracing::instrument;

use crate::domain::{ExtractionItem, FileType, Upload, UploadResponse};
use crate::error::ApiResult;
use crate::services::files::StoredFile;
use crate::services::tags::extract_tags;
use crate::store::{collections, DocumentStore};

/// Record an uploaded file and its extraction items.
///
/// Called only once `stored` is fully on disk, so a failed write leaves no
/// records behind. Item creation is not transactional: a failure midway
/// keeps the upload and the items written so far.
#[instrument(skip(store, stored), fields(size = stored.size_bytes))]
pub async fn ingest_upload(
    store: &DocumentStore,
    project_id: &str,
    filename: &str,
    stored: StoredFile,
) -> ApiResult<UploadResponse> {
    let filetype = FileType::from_filename(filename);

    let upload = Upload {
        project_id: project_id.to_string(),
        filename: filename.to_string(),
        filepath: stored.path.to_string_lossy().into_owned(),
        filetype,
        size_bytes: stored.size_bytes,
    };
    let upload_id = store.create_document(collections::UPLOAD, &upload).await?;

    let tags = extract_tags(filename);
    for tag in &tags {
        let item = ExtractionItem::filename_tag(project_id, &upload_id, tag.as_str());
        store
            .create_document(collections::EXTRACTION_ITEM, &item)
            .await?;
    }

    tracing::info!(
        project_id,
        upload_id = %upload_id,
        filetype = %filetype,
        size_bytes = stored.size_bytes,
        tags = tags.len(),
        "Upload stored"
    );

    Ok(UploadResponse {
        upload_id,
        filetype,
        size: stored.size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::files::FileStorage;
    use crate::store::{filter_by, MemoryStore, Record};
    use serde_json::json;

    fn memory_store() -> DocumentStore {
        DocumentStore::Memory(MemoryStore::new())
    }

    async fn stored(files: &FileStorage, name: &str, data: &[u8]) -> StoredFile {
        let mut pending = files.create(name).await.unwrap();
        pending.write_chunk(data).await.unwrap();
        pending.finish().await.unwrap()
    }

    #[tokio::test]
    async fn upload_records_metadata_and_one_item_per_match() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStorage::new(dir.path());
        let store = memory_store();

        let file = stored(&files, "Drawing-P-101-REV2.pdf", b"%PDF-1.7").await;
        let path = file.path.clone();

        let resp = ingest_upload(&store, "p1", "Drawing-P-101-REV2.pdf", file)
            .await
            .unwrap();
        assert_eq!(resp.filetype, FileType::Pdf);
        assert_eq!(resp.size, 8);

        let uploads = store
            .get_documents(collections::UPLOAD, &Record::new(), 10)
            .await
            .unwrap();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0]["_id"], json!(resp.upload_id));
        assert_eq!(uploads[0]["filename"], json!("Drawing-P-101-REV2.pdf"));
        assert_eq!(uploads[0]["filetype"], json!("pdf"));
        assert_eq!(uploads[0]["size_bytes"], json!(8));
        assert_eq!(uploads[0]["filepath"], json!(path.to_string_lossy()));

        let items = store
            .get_documents(
                collections::EXTRACTION_ITEM,
                &filter_by(&[("upload_id", Some(resp.upload_id.as_str()))]),
                10,
            )
            .await
            .unwrap();
        let labels: Vec<_> = items.iter().map(|i| i["label"].clone()).collect();
        assert_eq!(labels, vec![json!("P-101"), json!("REV2")]);
        assert!(items.iter().all(|i| i["confidence"] == json!(0.4)));
    }

    #[tokio::test]
    async fn filename_without_tags_records_upload_only() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileStorage::new(dir.path());
        let store = memory_store();

        let file = stored(&files, "readme.txt", b"notes").await;
        let resp = ingest_upload(&store, "p1", "readme.txt", file).await.unwrap();

        assert_eq!(resp.filetype, FileType::Other);
        assert_eq!(
            store.list_collection_names().await.unwrap(),
            vec![collections::UPLOAD.to_string()]
        );
    }
}
