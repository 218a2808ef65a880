//! PostgreSQL-backed projects, boards, tasks and file metadata.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use tasklane_application::{BoardRepository, FileRepository, ProjectRepository, TaskRepository};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{
    AccountId, Board, BoardId, FileId, Project, ProjectFile, ProjectId, Task, TaskId, TaskStatus,
};

mod boards;
mod files;
mod tasks;

#[cfg(test)]
mod tests;

/// PostgreSQL implementation of the project content repository ports.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: uuid::Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: ProjectId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create_project(&self, project: Project) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, description, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(project.name)
        .bind(project.description)
        .bind(project.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create project: {error}")))?;

        Ok(())
    }

    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find project: {error}")))?;

        Ok(row.map(Project::from))
    }

    async fn list_projects(&self, project_ids: &[ProjectId]) -> AppResult<Vec<Project>> {
        let ids = project_ids
            .iter()
            .map(ProjectId::as_uuid)
            .collect::<Vec<_>>();

        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT id, name, description, created_at
            FROM projects
            WHERE id = ANY($1)
            ORDER BY created_at, id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list projects: {error}")))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn update_project(&self, project: Project) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(project.name)
        .bind(project.description)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update project: {error}")))?;

        ensure_affected(result.rows_affected(), "project", project.id)
    }

    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete project: {error}")))?;

        ensure_affected(result.rows_affected(), "project", project_id)
    }
}

fn ensure_affected(
    rows_affected: u64,
    resource: &str,
    id: impl std::fmt::Display,
) -> AppResult<()> {
    if rows_affected == 0 {
        return Err(AppError::NotFound(format!(
            "{resource} '{id}' was not found"
        )));
    }

    Ok(())
}
