use async_trait::async_trait;
use tasklane_core::AppResult;
use tasklane_domain::{Board, BoardId, ProjectId, Task};

/// Result of reading one listing from the cache.
///
/// A miss carries the generation observed at read time. Invalidation bumps
/// the generation, so a write-back presenting an older one is discarded and
/// a listing read before a concurrent mutation never lands in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup<T> {
    /// Live cached listing.
    Hit(Vec<T>),
    /// No live entry; write-back must present this generation.
    Miss(u64),
    /// The cache could not be read; skip the write-back.
    Unavailable,
}

/// Optional cache port for board and task listings.
#[async_trait]
pub trait ProjectContentCache: Send + Sync {
    /// Returns the cached board list of a project.
    async fn get_boards(&self, project_id: ProjectId) -> AppResult<CacheLookup<Board>>;

    /// Stores the board list of a project with ttl if `generation` is still current.
    async fn set_boards(
        &self,
        project_id: ProjectId,
        generation: u64,
        boards: &[Board],
        ttl_seconds: u32,
    ) -> AppResult<()>;

    /// Drops the cached board list of a project and bumps its generation.
    async fn invalidate_boards(&self, project_id: ProjectId) -> AppResult<()>;

    /// Returns the cached task list of a board.
    async fn get_tasks(&self, board_id: BoardId) -> AppResult<CacheLookup<Task>>;

    /// Stores the task list of a board with ttl if `generation` is still current.
    async fn set_tasks(
        &self,
        board_id: BoardId,
        generation: u64,
        tasks: &[Task],
        ttl_seconds: u32,
    ) -> AppResult<()>;

    /// Drops the cached task list of a board and bumps its generation.
    async fn invalidate_tasks(&self, board_id: BoardId) -> AppResult<()>;
}
