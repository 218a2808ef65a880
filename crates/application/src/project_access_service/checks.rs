use std::collections::BTreeMap;

use super::*;

impl ProjectAccessService {
    /// Ensures the actor holds a role satisfying `required` in the project.
    ///
    /// Owner passes every check. An Owner requirement is only met by an owner
    /// row. Admin passes every other requirement. Otherwise the exact role
    /// must be held.
    pub async fn check_access(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        required: ProjectRole,
    ) -> AppResult<()> {
        if self.has_access(actor, project_id, required).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "account '{}' is missing role '{}' in project '{project_id}'",
            actor.account_id(),
            required.as_str()
        )))
    }

    /// Returns whether the actor holds a role satisfying `required`.
    pub async fn has_access(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        required: ProjectRole,
    ) -> AppResult<bool> {
        let held = self
            .repository
            .list_roles(project_id, actor_id(actor))
            .await?;

        Ok(required.is_satisfied_by(&held))
    }

    /// Returns the roles the actor holds in the project, possibly none.
    pub async fn roles_of(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<Vec<ProjectRole>> {
        let mut roles = self
            .repository
            .list_roles(project_id, actor_id(actor))
            .await?;
        roles.sort();
        roles.dedup();
        Ok(roles)
    }

    /// Lists every member of the project with its role set.
    pub async fn list_members(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<Vec<ProjectMember>> {
        self.check_access(actor, project_id, ProjectRole::Member)
            .await?;

        let assignments = self.repository.list_assignments(project_id).await?;
        let mut by_account: BTreeMap<AccountId, Vec<ProjectRole>> = BTreeMap::new();
        for assignment in assignments {
            by_account
                .entry(assignment.account_id)
                .or_default()
                .push(assignment.role);
        }

        Ok(by_account
            .into_iter()
            .map(|(account_id, mut roles)| {
                roles.sort();
                roles.dedup();
                ProjectMember { account_id, roles }
            })
            .collect())
    }

    /// Returns whether an arbitrary account holds any role in the project.
    pub async fn is_participant(
        &self,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<bool> {
        Ok(!self
            .repository
            .list_roles(project_id, account_id)
            .await?
            .is_empty())
    }

    /// Lists projects where the actor holds at least one role.
    pub async fn projects_of(&self, actor: &AccountIdentity) -> AppResult<Vec<ProjectId>> {
        self.repository
            .list_projects_for_account(actor_id(actor))
            .await
    }
}
