use super::*;

impl ProjectAccessService {
    /// Makes the actor the first owner of a freshly created project.
    ///
    /// Only reachable from project creation; a project that already has an
    /// owner is rejected with `Conflict`.
    pub(crate) async fn claim_project(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<()> {
        let owner = actor_id(actor);
        let current_owners = self
            .repository
            .list_assignments_with_role(project_id, ProjectRole::Owner)
            .await?;
        if !current_owners.is_empty() {
            return Err(AppError::Conflict(format!(
                "project '{project_id}' already has an owner"
            )));
        }

        let mut changes = RoleAssignmentChanges::new();
        changes.insert(RoleAssignment::new(project_id, owner, ProjectRole::Owner));
        self.repository.commit_changes(changes).await?;

        self.append_role_event(
            actor,
            project_id,
            AuditAction::ProjectOwnerChanged,
            format!("{project_id}:{owner}:owner"),
            format!("claimed ownership for '{owner}'"),
        )
        .await
    }

    /// Moves project ownership to `new_owner` in one commit.
    ///
    /// Only the current owner may transfer, the new owner must already be a
    /// member, and the previous owner keeps a member row. A project without
    /// an owner cannot be claimed through this operation.
    pub async fn change_owner(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        new_owner: AccountId,
    ) -> AppResult<()> {
        self.check_access(actor, project_id, ProjectRole::Owner)
            .await?;

        let current_owners = self
            .repository
            .list_assignments_with_role(project_id, ProjectRole::Owner)
            .await?;

        let new_owner_roles = self.repository.list_roles(project_id, new_owner).await?;
        if !new_owner_roles.contains(&ProjectRole::Member) {
            return Err(RoleRuleViolation::AccountNotMemberInProject.into());
        }

        let mut changes = RoleAssignmentChanges::new();
        for previous_owner in &current_owners {
            let previous_roles = self
                .repository
                .list_roles(project_id, previous_owner.account_id)
                .await?;
            if !previous_roles.contains(&ProjectRole::Member) {
                changes.insert(RoleAssignment::new(
                    project_id,
                    previous_owner.account_id,
                    ProjectRole::Member,
                ));
            }
        }
        changes.delete_many(current_owners.iter().copied());
        changes.insert(RoleAssignment::new(
            project_id,
            new_owner,
            ProjectRole::Owner,
        ));
        self.repository.commit_changes(changes).await?;

        let previous = current_owners
            .iter()
            .map(|assignment| assignment.account_id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.append_role_event(
            actor,
            project_id,
            AuditAction::ProjectOwnerChanged,
            format!("{project_id}:{new_owner}:owner"),
            format!("transferred ownership from '{previous}' to '{new_owner}'"),
        )
        .await
    }

    /// Adds `account_id` as a member of the project.
    pub async fn add_member(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<()> {
        self.check_access(actor, project_id, ProjectRole::Admin)
            .await?;

        let roles = self.repository.list_roles(project_id, account_id).await?;
        if roles.contains(&ProjectRole::Member) {
            return Err(RoleRuleViolation::ProjectRolesAlreadyExists.into());
        }

        let mut changes = RoleAssignmentChanges::new();
        changes.insert(RoleAssignment::new(
            project_id,
            account_id,
            ProjectRole::Member,
        ));
        self.repository.commit_changes(changes).await?;

        self.append_role_event(
            actor,
            project_id,
            AuditAction::ProjectMemberAdded,
            format!("{project_id}:{account_id}:member"),
            format!("added member '{account_id}'"),
        )
        .await
    }

    /// Grants an elevated role to an existing member.
    ///
    /// Owner and Member have dedicated operations and are rejected here.
    pub async fn grant_role(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        account_id: AccountId,
        role: ProjectRole,
    ) -> AppResult<()> {
        match role {
            ProjectRole::Owner => {
                return Err(RoleRuleViolation::AttemptChangeOwnerFromGrantRole.into());
            }
            ProjectRole::Member => {
                return Err(RoleRuleViolation::AttemptAddMemberFromGrantRole.into());
            }
            ProjectRole::Admin | ProjectRole::Update => {}
        }

        self.check_access(actor, project_id, ProjectRole::Admin)
            .await?;

        let roles = self.repository.list_roles(project_id, account_id).await?;
        if !roles.contains(&ProjectRole::Member) {
            return Err(RoleRuleViolation::AccountNotMemberInProject.into());
        }
        if roles.contains(&role) {
            return Err(RoleRuleViolation::ProjectRolesAlreadyExists.into());
        }

        let mut changes = RoleAssignmentChanges::new();
        changes.insert(RoleAssignment::new(project_id, account_id, role));
        self.repository.commit_changes(changes).await?;

        self.append_role_event(
            actor,
            project_id,
            AuditAction::ProjectRoleGranted,
            format!("{project_id}:{account_id}:{role}"),
            format!("granted role '{role}' to '{account_id}'"),
        )
        .await
    }

    /// Revokes one role from an account.
    ///
    /// Revoking Member removes every role the account holds in the project.
    pub async fn revoke_role(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        account_id: AccountId,
        role: ProjectRole,
    ) -> AppResult<()> {
        match role {
            ProjectRole::Owner => {
                return Err(RoleRuleViolation::AttemptToRemoveOwnerRole.into());
            }
            ProjectRole::Member => {
                return self.revoke_all_roles(actor, project_id, account_id).await;
            }
            ProjectRole::Admin | ProjectRole::Update => {}
        }

        self.check_access(actor, project_id, ProjectRole::Admin)
            .await?;

        let roles = self.repository.list_roles(project_id, account_id).await?;
        if !roles.contains(&role) {
            return Err(RoleRuleViolation::ProjectRoleNotFound.into());
        }

        let mut changes = RoleAssignmentChanges::new();
        changes.delete(RoleAssignment::new(project_id, account_id, role));
        self.repository.commit_changes(changes).await?;

        self.append_role_event(
            actor,
            project_id,
            AuditAction::ProjectRoleRevoked,
            format!("{project_id}:{account_id}:{role}"),
            format!("revoked role '{role}' from '{account_id}'"),
        )
        .await
    }

    /// Removes every role an account holds in the project.
    ///
    /// Owners cannot be removed; ownership must be transferred first.
    pub async fn revoke_all_roles(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<()> {
        self.check_access(actor, project_id, ProjectRole::Admin)
            .await?;

        let roles = self.repository.list_roles(project_id, account_id).await?;
        if roles.is_empty() {
            return Err(RoleRuleViolation::AccountNotMemberInProject.into());
        }
        if roles.contains(&ProjectRole::Owner) {
            return Err(RoleRuleViolation::AttemptToRemoveOwnerRole.into());
        }

        let mut changes = RoleAssignmentChanges::new();
        changes.delete_many(
            roles
                .iter()
                .map(|role| RoleAssignment::new(project_id, account_id, *role)),
        );
        self.repository.commit_changes(changes).await?;

        let removed = roles
            .iter()
            .map(ProjectRole::as_str)
            .collect::<Vec<_>>()
            .join(",");

        self.append_role_event(
            actor,
            project_id,
            AuditAction::ProjectMemberRemoved,
            format!("{project_id}:{account_id}"),
            format!("removed '{account_id}' with roles [{removed}]"),
        )
        .await
    }

    /// Drops every remaining assignment of a deleted project.
    pub(crate) async fn release_project(&self, project_id: ProjectId) -> AppResult<()> {
        let assignments = self.repository.list_assignments(project_id).await?;
        if assignments.is_empty() {
            return Ok(());
        }

        let mut changes = RoleAssignmentChanges::new();
        changes.delete_many(assignments);
        self.repository.commit_changes(changes).await
    }
}
