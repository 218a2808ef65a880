//! File attachment use-cases.

use std::sync::Arc;

use chrono::Utc;
use tasklane_core::{AccountIdentity, AppError, AppResult};
use tasklane_domain::{FileId, ProjectFile, ProjectId, ProjectRole, validate_file_name};
use tracing::warn;

use crate::project_access_service::actor_id;
use crate::project_ports::{FileRepository, FileStorage, TaskRepository, UploadFileInput};
use crate::ProjectAccessService;

#[cfg(test)]
mod tests;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Application service for files attached to projects and tasks.
#[derive(Clone)]
pub struct FileService {
    access_service: ProjectAccessService,
    repository: Arc<dyn FileRepository>,
    task_repository: Arc<dyn TaskRepository>,
    storage: Arc<dyn FileStorage>,
    max_upload_bytes: usize,
}

impl FileService {
    /// Creates a file service accepting uploads up to `max_upload_bytes`.
    #[must_use]
    pub fn new(
        access_service: ProjectAccessService,
        repository: Arc<dyn FileRepository>,
        task_repository: Arc<dyn TaskRepository>,
        storage: Arc<dyn FileStorage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            access_service,
            repository,
            task_repository,
            storage,
            max_upload_bytes,
        }
    }

    /// Fails unless the actor may upload into the project.
    ///
    /// Lets transports reject a caller before reading the request body.
    pub async fn authorize_upload(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<()> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await
    }

    /// Stores an uploaded file and its metadata.
    pub async fn upload_file(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        input: UploadFileInput,
    ) -> AppResult<ProjectFile> {
        self.authorize_upload(actor, project_id).await?;

        let file_name = validate_file_name(&input.file_name)?;
        if input.bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_owned()));
        }
        if input.bytes.len() > self.max_upload_bytes {
            return Err(AppError::Validation(format!(
                "uploaded file exceeds the limit of {} bytes",
                self.max_upload_bytes
            )));
        }

        if let Some(task_id) = input.task_id
            && self
                .task_repository
                .find_task(project_id, task_id)
                .await?
                .is_none()
        {
            return Err(AppError::NotFound(format!(
                "task '{task_id}' was not found in project '{project_id}'"
            )));
        }

        let content_type = match input.content_type.trim() {
            "" => DEFAULT_CONTENT_TYPE.to_owned(),
            value => value.to_owned(),
        };
        let size_bytes = i64::try_from(input.bytes.len())
            .map_err(|_| AppError::Validation("uploaded file is too large".to_owned()))?;

        let file_id = FileId::new();
        let file = ProjectFile {
            id: file_id,
            project_id,
            task_id: input.task_id,
            file_name,
            content_type,
            size_bytes,
            storage_key: format!("{project_id}/{file_id}"),
            uploaded_by: actor_id(actor),
            created_at: Utc::now(),
        };

        self.storage.put(&file.storage_key, input.bytes).await?;
        if let Err(error) = self.repository.create_file(file.clone()).await {
            if let Err(cleanup_error) = self.storage.delete(&file.storage_key).await {
                warn!(
                    storage_key = %file.storage_key,
                    error = %cleanup_error,
                    "failed to remove orphaned upload"
                );
            }
            return Err(error);
        }

        Ok(file)
    }

    /// Lists file metadata of a project.
    pub async fn list_files(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<Vec<ProjectFile>> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Member)
            .await?;

        self.repository.list_files(project_id).await
    }

    /// Returns file metadata together with its contents.
    pub async fn download_file(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        file_id: FileId,
    ) -> AppResult<(ProjectFile, Vec<u8>)> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Member)
            .await?;

        let file = self.find_existing(project_id, file_id).await?;
        let bytes = self.storage.get(&file.storage_key).await?;

        Ok((file, bytes))
    }

    /// Deletes file metadata and contents.
    pub async fn delete_file(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        file_id: FileId,
    ) -> AppResult<()> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        let file = self.find_existing(project_id, file_id).await?;
        self.repository.delete_file(project_id, file_id).await?;
        self.storage.delete(&file.storage_key).await
    }

    async fn find_existing(&self, project_id: ProjectId, file_id: FileId) -> AppResult<ProjectFile> {
        self.repository
            .find_file(project_id, file_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "file '{file_id}' was not found in project '{project_id}'"
                ))
            })
    }
}
