use async_trait::async_trait;
use tasklane_core::AppResult;
use tasklane_domain::{Board, BoardId, FileId, Project, ProjectFile, ProjectId, Task, TaskId};

/// Repository port for project records.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persists a new project.
    async fn create_project(&self, project: Project) -> AppResult<()>;

    /// Returns one project by id.
    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>>;

    /// Returns every listed project that exists, ordered by creation time.
    async fn list_projects(&self, project_ids: &[ProjectId]) -> AppResult<Vec<Project>>;

    /// Replaces name and description of an existing project.
    async fn update_project(&self, project: Project) -> AppResult<()>;

    /// Deletes a project together with its boards, tasks and file metadata.
    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()>;
}

/// Repository port for boards.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Lists boards of a project ordered by position.
    async fn list_boards(&self, project_id: ProjectId) -> AppResult<Vec<Board>>;

    /// Returns one board scoped to its project.
    async fn find_board(&self, project_id: ProjectId, board_id: BoardId)
    -> AppResult<Option<Board>>;

    /// Persists a new board.
    async fn create_board(&self, board: Board) -> AppResult<()>;

    /// Renames an existing board.
    async fn rename_board(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        name: &str,
    ) -> AppResult<()>;

    /// Deletes a board and its tasks.
    async fn delete_board(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<()>;
}

/// Repository port for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists tasks of one board ordered by creation time.
    async fn list_tasks(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<Vec<Task>>;

    /// Returns one task scoped to its project.
    async fn find_task(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<Option<Task>>;

    /// Persists a new task.
    async fn create_task(&self, task: Task) -> AppResult<()>;

    /// Replaces an existing task.
    async fn update_task(&self, task: Task) -> AppResult<()>;

    /// Deletes one task.
    async fn delete_task(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<()>;
}

/// Repository port for file metadata.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Lists files of a project ordered by upload time.
    async fn list_files(&self, project_id: ProjectId) -> AppResult<Vec<ProjectFile>>;

    /// Returns one file scoped to its project.
    async fn find_file(
        &self,
        project_id: ProjectId,
        file_id: FileId,
    ) -> AppResult<Option<ProjectFile>>;

    /// Persists file metadata.
    async fn create_file(&self, file: ProjectFile) -> AppResult<()>;

    /// Deletes file metadata.
    async fn delete_file(&self, project_id: ProjectId, file_id: FileId) -> AppResult<()>;
}
