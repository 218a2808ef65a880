use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tasklane_core::AppError;

use crate::{AccountId, ProjectId};

/// Roles an account can hold inside one project.
///
/// An account may hold several roles at once. Owner is unique per project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Unique, all-powerful role. Only changed through ownership transfer.
    Owner,
    /// Every privilege except owner-only actions.
    Admin,
    /// Allows mutating project content.
    Update,
    /// Baseline membership, prerequisite for any elevated grant.
    Member,
}

impl ProjectRole {
    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Update => "update",
            Self::Member => "member",
        }
    }

    /// Returns all known roles.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[ProjectRole] = &[
            ProjectRole::Owner,
            ProjectRole::Admin,
            ProjectRole::Update,
            ProjectRole::Member,
        ];

        ALL
    }

    /// Returns the held roles that satisfy a requirement for this role.
    ///
    /// Owner is only satisfied by Owner. Admin implies Update and Member.
    /// Update and Member do not imply each other.
    #[must_use]
    pub fn satisfying(&self) -> &'static [Self] {
        match self {
            Self::Owner => &[Self::Owner],
            Self::Admin => &[Self::Owner, Self::Admin],
            Self::Update => &[Self::Owner, Self::Admin, Self::Update],
            Self::Member => &[Self::Owner, Self::Admin, Self::Member],
        }
    }

    /// Returns whether any of the held roles satisfies this requirement.
    #[must_use]
    pub fn is_satisfied_by(&self, held: &[Self]) -> bool {
        let satisfying = self.satisfying();
        held.iter().any(|role| satisfying.contains(role))
    }

    /// Parses a transport value into a role.
    pub fn from_transport(value: &str) -> Result<Self, AppError> {
        Self::from_str(value)
    }
}

impl FromStr for ProjectRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "update" => Ok(Self::Update),
            "member" => Ok(Self::Member),
            _ => Err(AppError::Validation(format!(
                "unknown project role value '{value}'"
            ))),
        }
    }
}

impl std::fmt::Display for ProjectRole {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One (project, account, role) grant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Project the role applies to.
    pub project_id: ProjectId,
    /// Account holding the role.
    pub account_id: AccountId,
    /// Granted role.
    pub role: ProjectRole,
}

impl RoleAssignment {
    /// Creates an assignment triple.
    #[must_use]
    pub fn new(project_id: ProjectId, account_id: AccountId, role: ProjectRole) -> Self {
        Self {
            project_id,
            account_id,
            role,
        }
    }
}
