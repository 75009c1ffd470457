use async_trait::async_trait;
use axum::body::Bytes;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::FileResult;

/// Byte store for accepted uploads, keyed by stored file name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Overwrites any existing file of the same name
    async fn put(&self, file_name: &str, bytes: Bytes) -> FileResult<()>;

    async fn get(&self, file_name: &str) -> FileResult<Option<Bytes>>;
}

/// Writes uploads into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put(&self, file_name: &str, bytes: Bytes) -> FileResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(())
    }

    async fn get(&self, file_name: &str) -> FileResult<Option<Bytes>> {
        match tokio::fs::read(self.root.join(file_name)).await {
            Ok(contents) => Ok(Some(Bytes::from(contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and local runs without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStorage {
    files: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn put(&self, file_name: &str, bytes: Bytes) -> FileResult<()> {
        self.files
            .write()
            .await
            .insert(file_name.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, file_name: &str) -> FileResult<Option<Bytes>> {
        Ok(self.files.read().await.get(file_name).cloned())
    }
}
