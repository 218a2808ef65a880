//! Project role-based access control.
//!
//! Decides whether an account may act on a project and owns every mutation of
//! project role assignments. The acting account is always passed explicitly.

use std::sync::Arc;

use tasklane_core::{AccountIdentity, AppError, AppResult, RoleRuleViolation};
use tasklane_domain::{AccountId, AuditAction, ProjectId, ProjectRole, RoleAssignment};

use crate::project_access_ports::{ProjectMember, ProjectRoleRepository, RoleAssignmentChanges};
use crate::{AuditEvent, AuditRepository};

mod checks;
mod mutations;


/// Application service for project role checks and role mutations.
#[derive(Clone)]
pub struct ProjectAccessService {
    repository: Arc<dyn ProjectRoleRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl ProjectAccessService {
    /// Creates a new access service from a role repository implementation.
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProjectRoleRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            repository,
            audit_repository,
        }
    }

    async fn append_role_event(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        action: AuditAction,
        resource_id: String,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                project_id,
                actor_id: actor_id(actor),
                action,
                resource_type: "project_role".to_owned(),
                resource_id,
                detail: Some(detail),
            })
            .await
    }
}

/// Returns the domain account id of an authenticated principal.
#[must_use]
pub fn actor_id(actor: &AccountIdentity) -> AccountId {
    AccountId::from_uuid(actor.account_id())
}
