//! Project lifecycle use-cases.

use std::sync::Arc;

use chrono::Utc;
use tasklane_core::{AccountIdentity, AppError, AppResult};
use tasklane_domain::{
    AuditAction, PROJECT_NAME_MAX_LENGTH, Project, ProjectId, ProjectRole, normalize_description,
    normalize_name,
};
use tracing::warn;

use crate::project_access_service::actor_id;
use crate::project_ports::{
    BoardRepository, FileStorage, ProjectContentCache, ProjectDetailsInput, ProjectRepository,
};
use crate::{AuditEntry, AuditEvent, AuditRepository, ProjectAccessService};


const AUDIT_PAGE_DEFAULT: usize = 50;
const AUDIT_PAGE_MAX: usize = 200;

/// Application service for project create, read, update and delete.
#[derive(Clone)]
pub struct ProjectService {
    access_service: ProjectAccessService,
    repository: Arc<dyn ProjectRepository>,
    board_repository: Arc<dyn BoardRepository>,
    file_storage: Arc<dyn FileStorage>,
    audit_repository: Arc<dyn AuditRepository>,
    content_cache: Option<Arc<dyn ProjectContentCache>>,
}

impl ProjectService {
    /// Creates a project service.
    #[must_use]
    pub fn new(
        access_service: ProjectAccessService,
        repository: Arc<dyn ProjectRepository>,
        board_repository: Arc<dyn BoardRepository>,
        file_storage: Arc<dyn FileStorage>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            access_service,
            repository,
            board_repository,
            file_storage,
            audit_repository,
            content_cache: None,
        }
    }

    /// Adds the listing cache whose entries are dropped on project deletion.
    #[must_use]
    pub fn with_content_cache(mut self, content_cache: Arc<dyn ProjectContentCache>) -> Self {
        self.content_cache = Some(content_cache);
        self
    }

    /// Creates a project and makes the actor its owner.
    pub async fn create_project(
        &self,
        actor: &AccountIdentity,
        input: ProjectDetailsInput,
    ) -> AppResult<Project> {
        let project = Project {
            id: ProjectId::new(),
            name: normalize_name("project name", &input.name, PROJECT_NAME_MAX_LENGTH)?,
            description: normalize_description(input.description),
            created_at: Utc::now(),
        };

        self.repository.create_project(project.clone()).await?;
        if let Err(error) = self.access_service.claim_project(actor, project.id).await {
            if let Err(cleanup_error) = self.repository.delete_project(project.id).await {
                warn!(
                    project_id = %project.id,
                    error = %cleanup_error,
                    "failed to remove unclaimed project"
                );
            }
            return Err(error);
        }

        self.append_project_event(
            actor,
            &project,
            AuditAction::ProjectCreated,
            format!("created project '{}'", project.name),
        )
        .await?;

        Ok(project)
    }

    /// Returns one project the actor is a member of.
    pub async fn get_project(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<Project> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Member)
            .await?;

        self.find_existing(project_id).await
    }

    /// Lists every project where the actor holds a role.
    pub async fn list_projects(&self, actor: &AccountIdentity) -> AppResult<Vec<Project>> {
        let project_ids = self.access_service.projects_of(actor).await?;
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.list_projects(&project_ids).await
    }

    /// Replaces the name and description of a project.
    pub async fn update_project(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        input: ProjectDetailsInput,
    ) -> AppResult<Project> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        let mut project = self.find_existing(project_id).await?;
        project.name = normalize_name("project name", &input.name, PROJECT_NAME_MAX_LENGTH)?;
        project.description = normalize_description(input.description);

        self.repository.update_project(project.clone()).await?;
        self.append_project_event(
            actor,
            &project,
            AuditAction::ProjectUpdated,
            format!("updated project '{}'", project.name),
        )
        .await?;

        Ok(project)
    }

    /// Deletes a project with all of its content and role assignments.
    pub async fn delete_project(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<()> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Owner)
            .await?;

        let project = self.find_existing(project_id).await?;
        let boards = self.board_repository.list_boards(project_id).await?;

        self.repository.delete_project(project_id).await?;
        self.access_service.release_project(project_id).await?;
        self.file_storage.purge_project(project_id).await?;

        if let Some(cache) = &self.content_cache {
            cache.invalidate_boards(project_id).await?;
            for board in &boards {
                cache.invalidate_tasks(board.id).await?;
            }
        }

        self.append_project_event(
            actor,
            &project,
            AuditAction::ProjectDeleted,
            format!("deleted project '{}'", project.name),
        )
        .await
    }

    /// Returns the newest audit entries of a project to its admins.
    pub async fn list_audit_events(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        limit: Option<usize>,
    ) -> AppResult<Vec<AuditEntry>> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Admin)
            .await?;

        let limit = limit
            .unwrap_or(AUDIT_PAGE_DEFAULT)
            .clamp(1, AUDIT_PAGE_MAX);
        self.audit_repository.list_events(project_id, limit).await
    }

    async fn find_existing(&self, project_id: ProjectId) -> AppResult<Project> {
        self.repository
            .find_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("project '{project_id}' was not found")))
    }

    async fn append_project_event(
        &self,
        actor: &AccountIdentity,
        project: &Project,
        action: AuditAction,
        detail: String,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                project_id: project.id,
                actor_id: actor_id(actor),
                action,
                resource_type: "project".to_owned(),
                resource_id: project.id.to_string(),
                detail: Some(detail),
            })
            .await
    }
}
