use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use tasklane_application::{CacheLookup, ProjectContentCache};
use tasklane_core::AppResult;
use tasklane_domain::{Board, BoardId, ProjectId, Task};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: Vec<T>,
    expires_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(value: Vec<T>, ttl_seconds: u32) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(u64::from(ttl_seconds)))
            .unwrap_or(now);

        Self { value, expires_at }
    }

    fn is_live(&self) -> bool {
        self.expires_at > Instant::now()
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    entry: Option<CacheEntry<T>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            entry: None,
        }
    }
}

/// Listing entries keyed by scope, each guarded by a generation counter.
#[derive(Debug)]
struct Listings<K, T> {
    slots: RwLock<HashMap<K, Slot<T>>>,
}

impl<K, T> Default for Listings<K, T> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, T> Listings<K, T>
where
    K: Eq + Hash + Copy,
    T: Clone,
{
    async fn get(&self, key: K) -> CacheLookup<T> {
        {
            let slots = self.slots.read().await;
            match slots.get(&key) {
                Some(Slot {
                    entry: Some(entry), ..
                }) if entry.is_live() => return CacheLookup::Hit(entry.value.clone()),
                Some(Slot { entry: None, generation }) => return CacheLookup::Miss(*generation),
                Some(_) => {}
                None => return CacheLookup::Miss(0),
            }
        }

        let mut slots = self.slots.write().await;
        let slot = slots.entry(key).or_default();
        if slot.entry.as_ref().is_some_and(|entry| !entry.is_live()) {
            slot.entry = None;
        }

        match &slot.entry {
            Some(entry) => CacheLookup::Hit(entry.value.clone()),
            None => CacheLookup::Miss(slot.generation),
        }
    }

    async fn set(&self, key: K, generation: u64, value: &[T], ttl_seconds: u32) {
        if ttl_seconds == 0 {
            return;
        }

        let mut slots = self.slots.write().await;
        let slot = slots.entry(key).or_default();
        if slot.generation == generation {
            slot.entry = Some(CacheEntry::new(value.to_vec(), ttl_seconds));
        }
    }

    async fn invalidate(&self, key: K) {
        let mut slots = self.slots.write().await;
        let slot = slots.entry(key).or_default();
        slot.generation += 1;
        slot.entry = None;
    }
}

/// In-memory cache adapter for board and task listings.
#[derive(Default)]
pub struct InMemoryProjectContentCache {
    boards: Listings<ProjectId, Board>,
    tasks: Listings<BoardId, Task>,
}

impl InMemoryProjectContentCache {
    /// Creates an empty in-memory listing cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectContentCache for InMemoryProjectContentCache {
    async fn get_boards(&self, project_id: ProjectId) -> AppResult<CacheLookup<Board>> {
        Ok(self.boards.get(project_id).await)
    }

    async fn set_boards(
        &self,
        project_id: ProjectId,
        generation: u64,
        boards: &[Board],
        ttl_seconds: u32,
    ) -> AppResult<()> {
        self.boards
            .set(project_id, generation, boards, ttl_seconds)
            .await;
        Ok(())
    }

    async fn invalidate_boards(&self, project_id: ProjectId) -> AppResult<()> {
        self.boards.invalidate(project_id).await;
        Ok(())
    }

    async fn get_tasks(&self, board_id: BoardId) -> AppResult<CacheLookup<Task>> {
        Ok(self.tasks.get(board_id).await)
    }

    async fn set_tasks(
        &self,
        board_id: BoardId,
        generation: u64,
        tasks: &[Task],
        ttl_seconds: u32,
    ) -> AppResult<()> {
        self.tasks.set(board_id, generation, tasks, ttl_seconds).await;
        Ok(())
    }

    async fn invalidate_tasks(&self, board_id: BoardId) -> AppResult<()> {
        self.tasks.invalidate(board_id).await;
        Ok(())
    }
}
