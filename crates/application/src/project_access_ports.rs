use async_trait::async_trait;
use tasklane_core::AppResult;
use tasklane_domain::{AccountId, ProjectId, ProjectRole, RoleAssignment};

/// Pending role-assignment writes applied in one transaction.
///
/// Deletes are applied before inserts so ownership can move inside a single
/// commit without two owner rows ever coexisting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleAssignmentChanges {
    /// Rows to remove.
    pub deletes: Vec<RoleAssignment>,
    /// Rows to add.
    pub inserts: Vec<RoleAssignment>,
}

impl RoleAssignmentChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one row for insertion.
    pub fn insert(&mut self, assignment: RoleAssignment) -> &mut Self {
        self.inserts.push(assignment);
        self
    }

    /// Queues one row for deletion.
    pub fn delete(&mut self, assignment: RoleAssignment) -> &mut Self {
        self.deletes.push(assignment);
        self
    }

    /// Queues several rows for deletion.
    pub fn delete_many(
        &mut self,
        assignments: impl IntoIterator<Item = RoleAssignment>,
    ) -> &mut Self {
        self.deletes.extend(assignments);
        self
    }

    /// Returns whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty()
    }
}

/// Role set held by one account in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    /// Member account.
    pub account_id: AccountId,
    /// Roles held, in hierarchy order.
    pub roles: Vec<ProjectRole>,
}

/// Repository port for project role assignments.
///
/// Implementations must enforce uniqueness of (project, account, role) rows and
/// at most one owner row per project.
#[async_trait]
pub trait ProjectRoleRepository: Send + Sync {
    /// Lists the roles one account holds in a project.
    async fn list_roles(
        &self,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<Vec<ProjectRole>>;

    /// Lists every assignment of one role in a project.
    async fn list_assignments_with_role(
        &self,
        project_id: ProjectId,
        role: ProjectRole,
    ) -> AppResult<Vec<RoleAssignment>>;

    /// Lists every assignment in a project.
    async fn list_assignments(&self, project_id: ProjectId) -> AppResult<Vec<RoleAssignment>>;

    /// Lists projects where the account holds at least one role.
    async fn list_projects_for_account(&self, account_id: AccountId) -> AppResult<Vec<ProjectId>>;

    /// Applies deletes then inserts atomically.
    async fn commit_changes(&self, changes: RoleAssignmentChanges) -> AppResult<()>;
}
