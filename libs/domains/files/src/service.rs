use axum::body::Bytes;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{FileError, FileResult};
use crate::models::{IncomingFile, UploadedFile};
use crate::storage::FileStorage;
use crate::validator::{STORED_EXTENSION, validate_file_name, validate_mime_type};

/// Validates and stores product image uploads.
#[derive(Clone)]
pub struct FileService<S: FileStorage> {
    storage: Arc<S>,
    public_path: String,
}

impl<S: FileStorage> FileService<S> {
    pub fn new(storage: S, public_path: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(storage),
            public_path: public_path.into().trim_end_matches('/').to_string(),
        }
    }

    /// Rejects anything not declared as `image/jpeg`, then stores it as
    /// `{uuid}.jpg`.
    #[instrument(skip(self, file), fields(original_name = %file.original_name, size = file.bytes.len()))]
    pub async fn upload(&self, file: IncomingFile) -> FileResult<UploadedFile> {
        let mime_type = validate_mime_type(file.mime_type.as_deref())?.to_string();

        let file_name = format!("{}.{}", Uuid::now_v7(), STORED_EXTENSION);
        let size = file.bytes.len() as u64;
        self.storage.put(&file_name, file.bytes).await?;

        tracing::info!(file_name = %file_name, "Accepted product image");

        Ok(UploadedFile {
            field_name: file.field_name,
            original_name: file.original_name,
            mime_type,
            size,
            location: format!("{}/{}", self.public_path, file_name),
            file_name,
        })
    }

    #[instrument(skip(self))]
    pub async fn open(&self, file_name: &str) -> FileResult<Bytes> {
        validate_file_name(file_name)?;

        self.storage
            .get(file_name)
            .await?
            .ok_or_else(|| FileError::NotFound(file_name.to_string()))
    }
}
