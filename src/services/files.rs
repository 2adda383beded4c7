//! Local file storage for uploaded drawings.

use axum::extract::multipart::Field;
use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::ApiResult;

/// A file written to storage.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// A file being written chunk by chunk.
///
/// Call [`PendingFile::finish`] once every chunk is written, or
/// [`PendingFile::discard`] to drop what was written so far.
#[derive(Debug)]
pub struct PendingFile {
    path: PathBuf,
    file: tokio::fs::File,
    size_bytes: u64,
}

impl PendingFile {
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.write_all(chunk).await?;
        self.size_bytes += chunk.len() as u64;
        Ok(())
    }

    pub async fn finish(mut self) -> io::Result<StoredFile> {
        if let Err(e) = self.file.flush().await {
            self.discard().await;
            return Err(e);
        }
        tracing::debug!(path = %self.path.display(), size_bytes = self.size_bytes, "Stored upload");

        Ok(StoredFile {
            path: self.path,
            size_bytes: self.size_bytes,
        })
    }

    pub async fn discard(self) {
        let PendingFile { path, file, .. } = self;
        drop(file);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial upload");
        }
    }
}

/// Upload directory on local disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tracing::info!(dir = %self.root.display(), "Upload storage ready");
        Ok(())
    }

    /// Open a fresh `<uuid>_<name>` file for writing.
    pub async fn create(&self, original_name: &str) -> io::Result<PendingFile> {
        let path = self.root.join(format!(
            "{}_{}",
            Uuid::new_v4(),
            storage_name(original_name)
        ));
        let file = tokio::fs::File::create(&path).await?;

        Ok(PendingFile {
            path,
            file,
            size_bytes: 0,
        })
    }

    /// Stream a multipart file part to disk.
    ///
    /// A read or write error removes the partial file, so nothing is left
    /// on disk for a failed upload.
    pub async fn save_field(
        &self,
        original_name: &str,
        field: &mut Field<'_>,
    ) -> ApiResult<StoredFile> {
        let mut pending = self.create(original_name).await?;

        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    pending.discard().await;
                    return Err(e.into());
                }
            };
            if let Err(e) = pending.write_chunk(&chunk).await {
                pending.discard().await;
                return Err(e.into());
            }
        }

        Ok(pending.finish().await?)
    }
}

/// Last path component of a client-supplied name.
fn storage_name(original: &str) -> &str {
    match original.rsplit(['/', '\\']).next().unwrap_or(original) {
        "" | "." | ".." => "upload",
        name => name,
    }
}
