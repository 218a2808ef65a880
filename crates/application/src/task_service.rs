//! Task use-cases with a read-through listing cache per board.

use std::sync::Arc;

use chrono::Utc;
use tasklane_core::{AccountIdentity, AppError, AppResult, RoleRuleViolation};
use tasklane_domain::{
    AccountId, BoardId, ProjectId, ProjectRole, TASK_TITLE_MAX_LENGTH, Task, TaskId, TaskStatus,
    normalize_description, normalize_name,
};

use crate::ProjectAccessService;
use crate::project_ports::{
    BoardRepository, CacheLookup, CreateTaskInput, ProjectContentCache, TaskRepository,
    UpdateTaskInput,
};


/// Application service for tasks placed on project boards.
#[derive(Clone)]
pub struct TaskService {
    access_service: ProjectAccessService,
    repository: Arc<dyn TaskRepository>,
    board_repository: Arc<dyn BoardRepository>,
    content_cache: Option<Arc<dyn ProjectContentCache>>,
    content_cache_ttl_seconds: u32,
}

impl TaskService {
    /// Creates a task service.
    #[must_use]
    pub fn new(
        access_service: ProjectAccessService,
        repository: Arc<dyn TaskRepository>,
        board_repository: Arc<dyn BoardRepository>,
    ) -> Self {
        Self {
            access_service,
            repository,
            board_repository,
            content_cache: None,
            content_cache_ttl_seconds: 0,
        }
    }

    /// Adds optional task listing cache behavior.
    #[must_use]
    pub fn with_content_cache(
        mut self,
        content_cache: Arc<dyn ProjectContentCache>,
        ttl_seconds: u32,
    ) -> Self {
        self.content_cache = Some(content_cache);
        self.content_cache_ttl_seconds = ttl_seconds;
        self
    }

    /// Lists tasks of one board.
    pub async fn list_tasks(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        board_id: BoardId,
    ) -> AppResult<Vec<Task>> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Member)
            .await?;
        self.ensure_board(project_id, board_id).await?;

        let cache = self
            .content_cache
            .as_ref()
            .filter(|_| self.content_cache_ttl_seconds > 0);
        let lookup = match cache {
            Some(cache) => cache.get_tasks(board_id).await?,
            None => CacheLookup::Unavailable,
        };
        let generation = match lookup {
            CacheLookup::Hit(tasks) => return Ok(tasks),
            CacheLookup::Miss(generation) => Some(generation),
            CacheLookup::Unavailable => None,
        };

        let tasks = self.repository.list_tasks(project_id, board_id).await?;

        if let Some(cache) = cache
            && let Some(generation) = generation
        {
            cache
                .set_tasks(board_id, generation, &tasks, self.content_cache_ttl_seconds)
                .await?;
        }

        Ok(tasks)
    }

    /// Returns one task of a project.
    pub async fn get_task(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> AppResult<Task> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Member)
            .await?;

        self.find_existing(project_id, task_id).await
    }

    /// Creates a task on a board of the project.
    pub async fn create_task(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        board_id: BoardId,
        input: CreateTaskInput,
    ) -> AppResult<Task> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;
        self.ensure_board(project_id, board_id).await?;

        let title = normalize_name("task title", &input.title, TASK_TITLE_MAX_LENGTH)?;
        self.ensure_assignee(project_id, input.assignee_id).await?;

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            project_id,
            board_id,
            title,
            description: normalize_description(input.description),
            status: input.status.unwrap_or(TaskStatus::Todo),
            assignee_id: input.assignee_id,
            created_at: now,
            updated_at: now,
        };

        self.repository.create_task(task.clone()).await?;
        self.invalidate_tasks(board_id).await?;

        Ok(task)
    }

    /// Replaces the editable fields of a task, possibly moving it to another board.
    pub async fn update_task(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        task_id: TaskId,
        input: UpdateTaskInput,
    ) -> AppResult<Task> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        let existing = self.find_existing(project_id, task_id).await?;
        if input.board_id != existing.board_id {
            self.ensure_board(project_id, input.board_id).await?;
        }

        let title = normalize_name("task title", &input.title, TASK_TITLE_MAX_LENGTH)?;
        self.ensure_assignee(project_id, input.assignee_id).await?;

        let task = Task {
            board_id: input.board_id,
            title,
            description: normalize_description(input.description),
            status: input.status,
            assignee_id: input.assignee_id,
            updated_at: Utc::now(),
            ..existing.clone()
        };

        self.repository.update_task(task.clone()).await?;
        self.invalidate_tasks(existing.board_id).await?;
        if task.board_id != existing.board_id {
            self.invalidate_tasks(task.board_id).await?;
        }

        Ok(task)
    }

    /// Deletes one task.
    pub async fn delete_task(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> AppResult<()> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        let task = self.find_existing(project_id, task_id).await?;
        self.repository.delete_task(project_id, task_id).await?;
        self.invalidate_tasks(task.board_id).await
    }

    async fn find_existing(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<Task> {
        self.repository
            .find_task(project_id, task_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "task '{task_id}' was not found in project '{project_id}'"
                ))
            })
    }

    async fn ensure_board(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<()> {
        if self
            .board_repository
            .find_board(project_id, board_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "board '{board_id}' was not found in project '{project_id}'"
            )));
        }

        Ok(())
    }

    async fn ensure_assignee(
        &self,
        project_id: ProjectId,
        assignee_id: Option<AccountId>,
    ) -> AppResult<()> {
        let Some(assignee_id) = assignee_id else {
            return Ok(());
        };

        if !self
            .access_service
            .is_participant(project_id, assignee_id)
            .await?
        {
            return Err(RoleRuleViolation::AccountNotMemberInProject.into());
        }

        Ok(())
    }

    async fn invalidate_tasks(&self, board_id: BoardId) -> AppResult<()> {
        match &self.content_cache {
            Some(cache) => cache.invalidate_tasks(board_id).await,
            None => Ok(()),
        }
    }
}
