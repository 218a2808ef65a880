use serde::{Deserialize, Serialize};
use tasklane_application::{AuditEntry, ProjectDetailsInput, ProjectMember};
use tasklane_domain::Project;
use ts_rs::TS;
use uuid::Uuid;

/// Incoming payload for project creation and update.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/project-details-request.ts"
)]
pub struct ProjectDetailsRequest {
    pub name: String,
    pub description: Option<String>,
}

impl From<ProjectDetailsRequest> for ProjectDetailsInput {
    fn from(request: ProjectDetailsRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
        }
    }
}

/// API representation of a project.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/project-response.ts"
)]
pub struct ProjectResponse {
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            project_id: project.id.to_string(),
            name: project.name,
            description: project.description,
            created_at: project.created_at.to_rfc3339(),
        }
    }
}

/// Incoming payload for adding a project member.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/add-member-request.ts"
)]
pub struct AddMemberRequest {
    #[ts(type = "string")]
    pub account_id: Uuid,
}

/// Incoming payload for ownership transfer.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/change-owner-request.ts"
)]
pub struct ChangeOwnerRequest {
    #[ts(type = "string")]
    pub account_id: Uuid,
}

/// Incoming payload for granting an elevated project role.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/grant-role-request.ts"
)]
pub struct GrantRoleRequest {
    pub role: String,
}

/// API representation of one project member and its roles.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/project-member-response.ts"
)]
pub struct ProjectMemberResponse {
    pub account_id: String,
    pub roles: Vec<String>,
}

impl From<ProjectMember> for ProjectMemberResponse {
    fn from(member: ProjectMember) -> Self {
        Self {
            account_id: member.account_id.to_string(),
            roles: member
                .roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
        }
    }
}

/// Query string of the project audit trail.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-query.ts"
)]
pub struct AuditQuery {
    pub limit: Option<usize>,
}

/// API representation of one project audit entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-entry-response.ts"
)]
pub struct AuditEntryResponse {
    pub actor_id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub detail: Option<String>,
    pub created_at: String,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        Self {
            actor_id: entry.actor_id.to_string(),
            action: entry.action.as_str().to_owned(),
            resource_type: entry.resource_type,
            resource_id: entry.resource_id,
            detail: entry.detail,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}
