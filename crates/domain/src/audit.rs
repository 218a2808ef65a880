use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a project is created and claimed.
    ProjectCreated,
    /// Emitted when project details change.
    ProjectUpdated,
    /// Emitted when a project is deleted.
    ProjectDeleted,
    /// Emitted when ownership moves to another account.
    ProjectOwnerChanged,
    /// Emitted when an account joins a project.
    ProjectMemberAdded,
    /// Emitted when an elevated role is granted.
    ProjectRoleGranted,
    /// Emitted when a single role is revoked.
    ProjectRoleRevoked,
    /// Emitted when every role of an account is removed.
    ProjectMemberRemoved,
}

impl AuditAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ProjectCreated,
        Self::ProjectUpdated,
        Self::ProjectDeleted,
        Self::ProjectOwnerChanged,
        Self::ProjectMemberAdded,
        Self::ProjectRoleGranted,
        Self::ProjectRoleRevoked,
        Self::ProjectMemberRemoved,
    ];

    /// Parses a stored action value.
    #[must_use]
    pub fn from_storage(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
    }

    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectCreated => "project.created",
            Self::ProjectUpdated => "project.updated",
            Self::ProjectDeleted => "project.deleted",
            Self::ProjectOwnerChanged => "project.owner_changed",
            Self::ProjectMemberAdded => "project.member_added",
            Self::ProjectRoleGranted => "project.role_granted",
            Self::ProjectRoleRevoked => "project.role_revoked",
            Self::ProjectMemberRemoved => "project.member_removed",
        }
    }
}
