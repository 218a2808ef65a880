//! File contents stored on the local filesystem.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use tasklane_application::FileStorage;
use tasklane_core::{AppError, AppResult};
use tasklane_domain::ProjectId;

/// Filesystem implementation of the file storage port rooted at one directory.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Creates a storage adapter writing below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, storage_key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(storage_key);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if storage_key.is_empty() || !is_plain {
            return Err(AppError::Validation(format!(
                "storage key '{storage_key}' is not allowed"
            )));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn put(&self, storage_key: &str, bytes: Vec<u8>) -> AppResult<()> {
        let path = self.resolve(storage_key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|error| {
                AppError::Internal(format!("failed to create storage directory: {error}"))
            })?;
        }

        fs::write(&path, bytes).await.map_err(|error| {
            AppError::Internal(format!("failed to write file '{storage_key}': {error}"))
        })
    }

    async fn get(&self, storage_key: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(storage_key)?;
        fs::read(&path).await.map_err(|error| match error.kind() {
            ErrorKind::NotFound => {
                AppError::NotFound(format!("stored file '{storage_key}' is missing"))
            }
            _ => AppError::Internal(format!("failed to read file '{storage_key}': {error}")),
        })
    }

    async fn delete(&self, storage_key: &str) -> AppResult<()> {
        let path = self.resolve(storage_key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to delete file '{storage_key}': {error}"
            ))),
        }
    }

    async fn purge_project(&self, project_id: ProjectId) -> AppResult<()> {
        let directory = self.root.join(project_id.to_string());
        match fs::remove_dir_all(&directory).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to purge files of project '{project_id}': {error}"
            ))),
        }
    }
}
