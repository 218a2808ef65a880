//! In-memory project role store for tests and database-less runs.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tasklane_application::{ProjectRoleRepository, RoleAssignmentChanges};
use tasklane_core::{AppError, AppResult, RoleRuleViolation};
use tasklane_domain::{AccountId, ProjectId, ProjectRole, RoleAssignment};

/// Role store enforcing row uniqueness and a single owner per project under one write lock.
#[derive(Default)]
pub struct InMemoryProjectRoleRepository {
    rows: RwLock<HashSet<RoleAssignment>>,
}

impl InMemoryProjectRoleRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRoleRepository for InMemoryProjectRoleRepository {
    async fn list_roles(
        &self,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<Vec<ProjectRole>> {
        let mut roles = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.project_id == project_id && row.account_id == account_id)
            .map(|row| row.role)
            .collect::<Vec<_>>();
        roles.sort();
        Ok(roles)
    }

    async fn list_assignments_with_role(
        &self,
        project_id: ProjectId,
        role: ProjectRole,
    ) -> AppResult<Vec<RoleAssignment>> {
        let mut assignments = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.project_id == project_id && row.role == role)
            .copied()
            .collect::<Vec<_>>();
        assignments.sort_by_key(|row| row.account_id);
        Ok(assignments)
    }

    async fn list_assignments(&self, project_id: ProjectId) -> AppResult<Vec<RoleAssignment>> {
        let mut assignments = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.project_id == project_id)
            .copied()
            .collect::<Vec<_>>();
        assignments.sort_by_key(|row| (row.account_id, row.role));
        Ok(assignments)
    }

    async fn list_projects_for_account(&self, account_id: AccountId) -> AppResult<Vec<ProjectId>> {
        let mut projects = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.account_id == account_id)
            .map(|row| row.project_id)
            .collect::<Vec<_>>();
        projects.sort();
        projects.dedup();
        Ok(projects)
    }

    async fn commit_changes(&self, changes: RoleAssignmentChanges) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let mut staged = rows.clone();

        for assignment in &changes.deletes {
            staged.remove(assignment);
        }

        for assignment in changes.inserts {
            if assignment.role == ProjectRole::Owner
                && staged.iter().any(|row| {
                    row.project_id == assignment.project_id && row.role == ProjectRole::Owner
                })
            {
                return Err(AppError::Conflict(
                    "project already has an owner".to_owned(),
                ));
            }

            if !staged.insert(assignment) {
                return Err(RoleRuleViolation::ProjectRolesAlreadyExists.into());
            }
        }

        *rows = staged;
        Ok(())
    }
}
