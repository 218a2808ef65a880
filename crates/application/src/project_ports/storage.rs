use async_trait::async_trait;
use tasklane_core::AppResult;
use tasklane_domain::ProjectId;

/// Port for raw file contents addressed by storage key.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes bytes under a key, replacing existing content.
    async fn put(&self, storage_key: &str, bytes: Vec<u8>) -> AppResult<()>;

    /// Reads the bytes stored under a key.
    async fn get(&self, storage_key: &str) -> AppResult<Vec<u8>>;

    /// Removes the bytes stored under a key. Missing keys are ignored.
    async fn delete(&self, storage_key: &str) -> AppResult<()>;

    /// Removes every object stored for a project.
    async fn purge_project(&self, project_id: ProjectId) -> AppResult<()>;
}
