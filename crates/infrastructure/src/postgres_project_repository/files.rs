use super::*;

#[derive(Debug, FromRow)]
struct FileRow {
    id: uuid::Uuid,
    project_id: uuid::Uuid,
    task_id: Option<uuid::Uuid>,
    file_name: String,
    content_type: String,
    size_bytes: i64,
    storage_key: String,
    uploaded_by: uuid::Uuid,
    created_at: DateTime<Utc>,
}

impl From<FileRow> for ProjectFile {
    fn from(row: FileRow) -> Self {
        Self {
            id: FileId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            task_id: row.task_id.map(TaskId::from_uuid),
            file_name: row.file_name,
            content_type: row.content_type,
            size_bytes: row.size_bytes,
            storage_key: row.storage_key,
            uploaded_by: AccountId::from_uuid(row.uploaded_by),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FileRepository for PostgresProjectRepository {
    async fn list_files(&self, project_id: ProjectId) -> AppResult<Vec<ProjectFile>> {
        let rows = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT
                id, project_id, task_id, file_name, content_type, size_bytes,
                storage_key, uploaded_by, created_at
            FROM project_files
            WHERE project_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list project files: {error}")))?;

        Ok(rows.into_iter().map(ProjectFile::from).collect())
    }

    async fn find_file(
        &self,
        project_id: ProjectId,
        file_id: FileId,
    ) -> AppResult<Option<ProjectFile>> {
        let row = sqlx::query_as::<_, FileRow>(
            r#"
            SELECT
                id, project_id, task_id, file_name, content_type, size_bytes,
                storage_key, uploaded_by, created_at
            FROM project_files
            WHERE project_id = $1 AND id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(file_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project file: {error}")))?;

        Ok(row.map(ProjectFile::from))
    }

    async fn create_file(&self, file: ProjectFile) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO project_files (
                id, project_id, task_id, file_name, content_type, size_bytes,
                storage_key, uploaded_by, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(file.id.as_uuid())
        .bind(file.project_id.as_uuid())
        .bind(file.task_id.map(|task_id| task_id.as_uuid()))
        .bind(file.file_name)
        .bind(file.content_type)
        .bind(file.size_bytes)
        .bind(file.storage_key)
        .bind(file.uploaded_by.as_uuid())
        .bind(file.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create project file: {error}")))?;

        Ok(())
    }

    async fn delete_file(&self, project_id: ProjectId, file_id: FileId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM project_files WHERE project_id = $1 AND id = $2")
            .bind(project_id.as_uuid())
            .bind(file_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete project file: {error}"))
            })?;

        ensure_affected(result.rows_affected(), "file", file_id)
    }
}
