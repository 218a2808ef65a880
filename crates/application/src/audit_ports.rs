use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tasklane_core::AppResult;
use tasklane_domain::{AccountId, AuditAction, ProjectId};

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Project scope for the event.
    pub project_id: ProjectId,
    /// Account that performed the action.
    pub actor_id: AccountId,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Stored audit event as read back for a project's audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Account that performed the action.
    pub actor_id: AccountId,
    /// Recorded action.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
    /// Time the event was stored.
    pub created_at: DateTime<Utc>,
}

/// Port for append-only audit events and their project trail.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;

    /// Lists the newest `limit` events of a project, newest first.
    async fn list_events(&self, project_id: ProjectId, limit: usize)
    -> AppResult<Vec<AuditEntry>>;
}
