//! PostgreSQL-backed project role assignments.
//!
//! The primary key on `(project_id, account_id, role)` and the partial unique
//! index on owner rows are the final authority on role invariants.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use tasklane_application::{ProjectRoleRepository, RoleAssignmentChanges};
use tasklane_core::{AppError, AppResult, RoleRuleViolation};
use tasklane_domain::{AccountId, ProjectId, ProjectRole, RoleAssignment};

#[cfg(test)]
mod tests;

const SINGLE_OWNER_INDEX: &str = "idx_project_roles_single_owner";

/// PostgreSQL implementation of the project role repository port.
#[derive(Clone)]
pub struct PostgresProjectRoleRepository {
    pool: PgPool,
}

impl PostgresProjectRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleAssignmentRow {
    project_id: uuid::Uuid,
    account_id: uuid::Uuid,
    role: String,
}

impl TryFrom<RoleAssignmentRow> for RoleAssignment {
    type Error = AppError;

    fn try_from(row: RoleAssignmentRow) -> Result<Self, Self::Error> {
        Ok(RoleAssignment::new(
            ProjectId::from_uuid(row.project_id),
            AccountId::from_uuid(row.account_id),
            parse_role(&row.role)?,
        ))
    }
}

#[async_trait]
impl ProjectRoleRepository for PostgresProjectRoleRepository {
    async fn list_roles(
        &self,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<Vec<ProjectRole>> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT role
            FROM project_roles
            WHERE project_id = $1 AND account_id = $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list project roles: {error}")))?;

        roles.iter().map(|role| parse_role(role)).collect()
    }

    async fn list_assignments_with_role(
        &self,
        project_id: ProjectId,
        role: ProjectRole,
    ) -> AppResult<Vec<RoleAssignment>> {
        let rows = sqlx::query_as::<_, RoleAssignmentRow>(
            r#"
            SELECT project_id, account_id, role
            FROM project_roles
            WHERE project_id = $1 AND role = $2
            ORDER BY account_id
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list project role assignments: {error}"))
        })?;

        rows.into_iter().map(RoleAssignment::try_from).collect()
    }

    async fn list_assignments(&self, project_id: ProjectId) -> AppResult<Vec<RoleAssignment>> {
        let rows = sqlx::query_as::<_, RoleAssignmentRow>(
            r#"
            SELECT project_id, account_id, role
            FROM project_roles
            WHERE project_id = $1
            ORDER BY account_id, role
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list project role assignments: {error}"))
        })?;

        rows.into_iter().map(RoleAssignment::try_from).collect()
    }

    async fn list_projects_for_account(&self, account_id: AccountId) -> AppResult<Vec<ProjectId>> {
        let project_ids = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT DISTINCT project_id
            FROM project_roles
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list projects for account: {error}"))
        })?;

        Ok(project_ids.into_iter().map(ProjectId::from_uuid).collect())
    }

    async fn commit_changes(&self, changes: RoleAssignmentChanges) -> AppResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        for assignment in &changes.deletes {
            sqlx::query(
                r#"
                DELETE FROM project_roles
                WHERE project_id = $1 AND account_id = $2 AND role = $3
                "#,
            )
            .bind(assignment.project_id.as_uuid())
            .bind(assignment.account_id.as_uuid())
            .bind(assignment.role.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete project role: {error}"))
            })?;
        }

        for assignment in &changes.inserts {
            sqlx::query(
                r#"
                INSERT INTO project_roles (project_id, account_id, role)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(assignment.project_id.as_uuid())
            .bind(assignment.account_id.as_uuid())
            .bind(assignment.role.as_str())
            .execute(&mut *transaction)
            .await
            .map_err(map_insert_error)?;
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit project role changes: {error}"))
        })?;

        Ok(())
    }
}

fn parse_role(value: &str) -> AppResult<ProjectRole> {
    ProjectRole::from_str(value).map_err(|_| {
        AppError::Internal(format!("invalid project role '{value}' stored in database"))
    })
}

fn map_insert_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        match database_error.code().as_deref() {
            Some("23505") if database_error.constraint() == Some(SINGLE_OWNER_INDEX) => {
                return AppError::Conflict("project already has an owner".to_owned());
            }
            Some("23505") => return RoleRuleViolation::ProjectRolesAlreadyExists.into(),
            Some("23503") => {
                return AppError::NotFound("project or account does not exist".to_owned());
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to insert project role: {error}"))
}
