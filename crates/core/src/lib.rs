//! Shared primitives for all Rust crates in Tasklane.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::AccountIdentity;

/// Result type used across Tasklane crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Project role-assignment requests rejected by membership rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RoleRuleViolation {
    /// Target account holds no membership in the project.
    #[error("account is not a member of the project")]
    AccountNotMemberInProject,

    /// Target account already holds the requested role.
    #[error("account already holds this project role")]
    ProjectRolesAlreadyExists,

    /// Target account does not hold the role being revoked.
    #[error("project role assignment was not found")]
    ProjectRoleNotFound,

    /// Owner role can only be transferred, never removed.
    #[error("the owner role cannot be removed, transfer ownership instead")]
    AttemptToRemoveOwnerRole,

    /// Owner role was requested through a generic grant.
    #[error("the owner role cannot be granted, use the change owner operation")]
    AttemptChangeOwnerFromGrantRole,

    /// Member role was requested through a generic grant.
    #[error("the member role cannot be granted, use the add member operation")]
    AttemptAddMemberFromGrantRole,
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks the required project role.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Role mutation was rejected by project membership rules.
    #[error("role rule violation: {0}")]
    RoleRule(RoleRuleViolation),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RoleRuleViolation> for AppError {
    fn from(value: RoleRuleViolation) -> Self {
        Self::RoleRule(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString, RoleRuleViolation};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn role_rule_violation_converts_into_app_error() {
        let error = AppError::from(RoleRuleViolation::AttemptToRemoveOwnerRole);
        assert!(matches!(
            error,
            AppError::RoleRule(RoleRuleViolation::AttemptToRemoveOwnerRole)
        ));
        assert!(error.to_string().starts_with("role rule violation:"));
    }
}
