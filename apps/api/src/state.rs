use sqlx::PgPool;
use tasklane_application::{
    AccountService, BoardService, FileService, ProjectAccessService, ProjectService, TaskService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub project_access_service: ProjectAccessService,
    pub project_service: ProjectService,
    pub board_service: BoardService,
    pub task_service: TaskService,
    pub file_service: FileService,
    pub frontend_url: String,
    pub max_upload_bytes: usize,
    pub postgres_pool: PgPool,
    pub redis_client: Option<redis::Client>,
}
