//! PostgreSQL-backed project audit trail.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use tasklane_application::{AuditEntry, AuditEvent, AuditRepository};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{AccountId, AuditAction, ProjectId};


/// PostgreSQL implementation of the audit port over `audit_log_entries`.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditEntryRow {
    actor_id: uuid::Uuid,
    action: String,
    resource_type: String,
    resource_id: String,
    detail: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditEntryRow> for AuditEntry {
    type Error = AppError;

    fn try_from(row: AuditEntryRow) -> Result<Self, Self::Error> {
        let action = AuditAction::from_storage(&row.action).ok_or_else(|| {
            AppError::Internal(format!("unknown audit action '{}' in storage", row.action))
        })?;

        Ok(Self {
            actor_id: AccountId::from_uuid(row.actor_id),
            action,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            detail: row.detail,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                project_id, actor_id, action, resource_type, resource_id, detail
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(event.project_id.as_uuid())
        .bind(event.actor_id.as_uuid())
        .bind(event.action.as_str())
        .bind(event.resource_type)
        .bind(event.resource_id)
        .bind(event.detail)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to record audit event for project '{}': {error}",
                event.project_id
            ))
        })?;

        Ok(())
    }

    async fn list_events(
        &self,
        project_id: ProjectId,
        limit: usize,
    ) -> AppResult<Vec<AuditEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, AuditEntryRow>(
            r#"
            SELECT actor_id, action, resource_type, resource_id, detail, created_at
            FROM audit_log_entries
            WHERE project_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(project_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list audit events for project '{project_id}': {error}"
            ))
        })?;

        rows.into_iter().map(AuditEntry::try_from).collect()
    }
}
