//! Redis-backed board and task listing cache.
//!
//! Reads and writes degrade to cache misses when Redis is unavailable.
//! Invalidation failures are returned so stale listings are never kept silently.
//!
//! Every listing has a generation counter. Entries are stored under a key that
//! embeds the generation they were read at, and invalidation increments the
//! counter, so a write-back racing an invalidation lands on a key nobody reads.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use tracing::warn;

use tasklane_application::{CacheLookup, ProjectContentCache};
use tasklane_core::{AppError, AppResult};
use tasklane_domain::{Board, BoardId, ProjectId, Task};

/// Redis implementation of the project content cache port.
#[derive(Clone)]
pub struct RedisProjectContentCache {
    client: redis::Client,
    key_prefix: String,
}

impl RedisProjectContentCache {
    /// Creates a cache adapter with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn boards_scope(&self, project_id: ProjectId) -> String {
        format!("{}:project={project_id}:boards", self.key_prefix)
    }

    fn tasks_scope(&self, board_id: BoardId) -> String {
        format!("{}:board={board_id}:tasks", self.key_prefix)
    }

    fn generation_key(scope: &str) -> String {
        format!("{scope}:gen")
    }

    fn entry_key(scope: &str, generation: u64) -> String {
        format!("{scope}:v{generation}")
    }

    async fn connection(&self) -> AppResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }

    async fn read_entry<T>(&self, scope: &str) -> AppResult<CacheLookup<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut connection = self.connection().await?;
        let generation_key = Self::generation_key(scope);
        let generation: Option<u64> = connection.get(&generation_key).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read cache generation '{generation_key}': {error}"
            ))
        })?;
        let generation = generation.unwrap_or_default();

        let key = Self::entry_key(scope, generation);
        let encoded: Option<String> = connection.get(&key).await.map_err(|error| {
            AppError::Internal(format!("failed to read cache entry '{key}': {error}"))
        })?;

        match encoded {
            Some(value) => serde_json::from_str::<Vec<T>>(&value)
                .map(CacheLookup::Hit)
                .map_err(|error| {
                    AppError::Internal(format!("invalid cache entry '{key}': {error}"))
                }),
            None => Ok(CacheLookup::Miss(generation)),
        }
    }

    async fn write_entry<T>(
        &self,
        scope: &str,
        generation: u64,
        value: &[T],
        ttl_seconds: u32,
    ) -> AppResult<()>
    where
        T: serde::Serialize,
    {
        let key = Self::entry_key(scope, generation);
        let encoded = serde_json::to_string(value).map_err(|error| {
            AppError::Internal(format!("failed to encode cache entry '{key}': {error}"))
        })?;

        let mut connection = self.connection().await?;
        connection
            .set_ex(&key, encoded, u64::from(ttl_seconds))
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to write cache entry '{key}': {error}"))
            })
    }

    async fn bump_generation(&self, scope: &str) -> AppResult<()> {
        let key = Self::generation_key(scope);
        let mut connection = self.connection().await?;
        let _: u64 = connection.incr(&key, 1_u64).await.map_err(|error| {
            AppError::Internal(format!("failed to invalidate cache entry '{key}': {error}"))
        })?;
        Ok(())
    }
}

#[async_trait]
impl ProjectContentCache for RedisProjectContentCache {
    async fn get_boards(&self, project_id: ProjectId) -> AppResult<CacheLookup<Board>> {
        match self.read_entry(&self.boards_scope(project_id)).await {
            Ok(lookup) => Ok(lookup),
            Err(error) => {
                warn!(%project_id, error = %error, "board listing cache read failed");
                Ok(CacheLookup::Unavailable)
            }
        }
    }

    async fn set_boards(
        &self,
        project_id: ProjectId,
        generation: u64,
        boards: &[Board],
        ttl_seconds: u32,
    ) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        if let Err(error) = self
            .write_entry(&self.boards_scope(project_id), generation, boards, ttl_seconds)
            .await
        {
            warn!(%project_id, error = %error, "board listing cache write failed");
        }

        Ok(())
    }

    async fn invalidate_boards(&self, project_id: ProjectId) -> AppResult<()> {
        self.bump_generation(&self.boards_scope(project_id)).await
    }

    async fn get_tasks(&self, board_id: BoardId) -> AppResult<CacheLookup<Task>> {
        match self.read_entry(&self.tasks_scope(board_id)).await {
            Ok(lookup) => Ok(lookup),
            Err(error) => {
                warn!(%board_id, error = %error, "task listing cache read failed");
                Ok(CacheLookup::Unavailable)
            }
        }
    }

    async fn set_tasks(
        &self,
        board_id: BoardId,
        generation: u64,
        tasks: &[Task],
        ttl_seconds: u32,
    ) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        if let Err(error) = self
            .write_entry(&self.tasks_scope(board_id), generation, tasks, ttl_seconds)
            .await
        {
            warn!(%board_id, error = %error, "task listing cache write failed");
        }

        Ok(())
    }

    async fn invalidate_tasks(&self, board_id: BoardId) -> AppResult<()> {
        self.bump_generation(&self.tasks_scope(board_id)).await
    }
}
