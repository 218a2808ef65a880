//! Board use-cases with a read-through listing cache.

use std::sync::Arc;

use tasklane_core::{AccountIdentity, AppError, AppResult};
use tasklane_domain::{BOARD_NAME_MAX_LENGTH, Board, BoardId, ProjectId, ProjectRole, normalize_name};

use crate::ProjectAccessService;
use crate::project_ports::{BoardRepository, CacheLookup, ProjectContentCache};


/// Application service for boards of a project.
#[derive(Clone)]
pub struct BoardService {
    access_service: ProjectAccessService,
    repository: Arc<dyn BoardRepository>,
    content_cache: Option<Arc<dyn ProjectContentCache>>,
    content_cache_ttl_seconds: u32,
}

impl BoardService {
    /// Creates a board service.
    #[must_use]
    pub fn new(access_service: ProjectAccessService, repository: Arc<dyn BoardRepository>) -> Self {
        Self {
            access_service,
            repository,
            content_cache: None,
            content_cache_ttl_seconds: 0,
        }
    }

    /// Adds optional board listing cache behavior.
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

    /// Lists boards of a project ordered by position.
    pub async fn list_boards(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
    ) -> AppResult<Vec<Board>> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Member)
            .await?;

        let cache = self
            .content_cache
            .as_ref()
            .filter(|_| self.content_cache_ttl_seconds > 0);
        let lookup = match cache {
            Some(cache) => cache.get_boards(project_id).await?,
            None => CacheLookup::Unavailable,
        };
        let generation = match lookup {
            CacheLookup::Hit(boards) => return Ok(boards),
            CacheLookup::Miss(generation) => Some(generation),
            CacheLookup::Unavailable => None,
        };

        let boards = self.repository.list_boards(project_id).await?;

        if let Some(cache) = cache
            && let Some(generation) = generation
        {
            cache
                .set_boards(project_id, generation, &boards, self.content_cache_ttl_seconds)
                .await?;
        }

        Ok(boards)
    }

    /// Appends a new board after the existing ones.
    pub async fn create_board(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        name: &str,
    ) -> AppResult<Board> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        let name = normalize_name("board name", name, BOARD_NAME_MAX_LENGTH)?;
        let position = self
            .repository
            .list_boards(project_id)
            .await?
            .iter()
            .map(|board| board.position + 1)
            .max()
            .unwrap_or(0);

        let board = Board {
            id: BoardId::new(),
            project_id,
            name,
            position,
        };
        self.repository.create_board(board.clone()).await?;
        self.invalidate_boards(project_id).await?;

        Ok(board)
    }

    /// Renames one board.
    pub async fn rename_board(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        board_id: BoardId,
        name: &str,
    ) -> AppResult<Board> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        let mut board = self.find_existing(project_id, board_id).await?;
        board.name = normalize_name("board name", name, BOARD_NAME_MAX_LENGTH)?;

        self.repository
            .rename_board(project_id, board_id, &board.name)
            .await?;
        self.invalidate_boards(project_id).await?;

        Ok(board)
    }

    /// Deletes one board together with its tasks.
    pub async fn delete_board(
        &self,
        actor: &AccountIdentity,
        project_id: ProjectId,
        board_id: BoardId,
    ) -> AppResult<()> {
        self.access_service
            .check_access(actor, project_id, ProjectRole::Update)
            .await?;

        self.find_existing(project_id, board_id).await?;
        self.repository.delete_board(project_id, board_id).await?;

        self.invalidate_boards(project_id).await?;
        if let Some(cache) = &self.content_cache {
            cache.invalidate_tasks(board_id).await?;
        }

        Ok(())
    }

    async fn find_existing(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<Board> {
        self.repository
            .find_board(project_id, board_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "board '{board_id}' was not found in project '{project_id}'"
                ))
            })
    }

    async fn invalidate_boards(&self, project_id: ProjectId) -> AppResult<()> {
        match &self.content_cache {
            Some(cache) => cache.invalidate_boards(project_id).await,
            None => Ok(()),
        }
    }
}
