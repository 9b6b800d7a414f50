//! # bb-storage-local
//!
//! Local filesystem implementation of `ContentStore`.
//! Blobs land in a flat uploads directory under a fresh uuid filename
//! (keeping the original extension) and are served back by the
//! static-files mount in the binary.

use std::path::PathBuf;

use async_trait::async_trait;
use bb_core::{ContentStore, FileRef, Upload};
use tokio::fs;
use uuid::Uuid;

pub struct LocalContentStore {
    /// Root directory for all uploads (e.g., "./data/uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/uploads")
    url_prefix: String,
}

impl LocalContentStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self {
            root_path: root,
            url_prefix,
        }
    }

    /// Fresh uuid filename, keeping the upload's extension so the
    /// static mount serves a sensible content type.
    fn unique_filename(original_name: &str) -> String {
        let ext = std::path::Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        format!("{}{ext}", Uuid::new_v4())
    }
}

#[async_trait]
impl ContentStore for LocalContentStore {
    async fn store(&self, upload: Upload) -> anyhow::Result<FileRef> {
        fs::create_dir_all(&self.root_path).await?;

        let filename = Self::unique_filename(&upload.original_name);
        fs::write(self.root_path.join(&filename), &upload.data).await?;

        // Prefer the client-declared type; fall back to guessing from
        // the original filename.
        let mime_type = upload.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&upload.original_name)
                .first_or_octet_stream()
                .to_string()
        });

        Ok(FileRef {
            file: format!("{}/{}", self.url_prefix, filename),
            mime_type,
            original_name: upload.original_name,
        })
    }
}
