//! In-memory fakes of every application port, shared by service tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use tasklane_core::{AccountIdentity, AppError, AppResult, RoleRuleViolation};
use tasklane_domain::{
    Account, AccountId, Board, BoardId, EmailAddress, FileId, Project, ProjectFile, ProjectId,
    ProjectRole, RoleAssignment, Task, TaskId, Username,
};

use crate::{
    AccountRepository, AuditEntry, AuditEvent, AuditRepository, BoardRepository, BoardService,
    CacheLookup, FileRepository, FileService, FileStorage, NewAccount, PasswordHasher,
    ProjectAccessService, ProjectContentCache, ProjectRepository, ProjectRoleRepository,
    ProjectService, RoleAssignmentChanges, TaskRepository, TaskService,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }

    async fn list_events(
        &self,
        project_id: ProjectId,
        limit: usize,
    ) -> AppResult<Vec<AuditEntry>> {
        Ok(self
            .events
            .lock()
            .await
            .iter()
            .rev()
            .filter(|event| event.project_id == project_id)
            .take(limit)
            .map(|event| AuditEntry {
                actor_id: event.actor_id,
                action: event.action,
                resource_type: event.resource_type.clone(),
                resource_id: event.resource_id.clone(),
                detail: event.detail.clone(),
                created_at: Utc::now(),
            })
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct FakeProjectRoleRepository {
    pub(crate) rows: Mutex<Vec<RoleAssignment>>,
    pub(crate) commits: Mutex<usize>,
    pub(crate) fail_commits: AtomicBool,
}

#[async_trait]
impl ProjectRoleRepository for FakeProjectRoleRepository {
    async fn list_roles(
        &self,
        project_id: ProjectId,
        account_id: AccountId,
    ) -> AppResult<Vec<ProjectRole>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.project_id == project_id && row.account_id == account_id)
            .map(|row| row.role)
            .collect())
    }

    async fn list_assignments_with_role(
        &self,
        project_id: ProjectId,
        role: ProjectRole,
    ) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.project_id == project_id && row.role == role)
            .copied()
            .collect())
    }

    async fn list_assignments(&self, project_id: ProjectId) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.project_id == project_id)
            .copied()
            .collect())
    }

    async fn list_projects_for_account(&self, account_id: AccountId) -> AppResult<Vec<ProjectId>> {
        let mut projects = self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| row.account_id == account_id)
            .map(|row| row.project_id)
            .collect::<Vec<_>>();
        projects.sort();
        projects.dedup();
        Ok(projects)
    }

    async fn commit_changes(&self, changes: RoleAssignmentChanges) -> AppResult<()> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(AppError::Internal("role store unavailable".to_owned()));
        }
        let mut rows = self.rows.lock().await;
        let mut staged = rows.clone();
        staged.retain(|row| !changes.deletes.contains(row));

        for insert in changes.inserts {
            if staged.contains(&insert) {
                return Err(RoleRuleViolation::ProjectRolesAlreadyExists.into());
            }
            if insert.role == ProjectRole::Owner
                && staged
                    .iter()
                    .any(|row| row.project_id == insert.project_id && row.role == ProjectRole::Owner)
            {
                return Err(AppError::Conflict("project already has an owner".to_owned()));
            }
            staged.push(insert);
        }

        *rows = staged;
        *self.commits.lock().await += 1;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeContentStore {
    pub(crate) projects: Mutex<Vec<Project>>,
    pub(crate) boards: Mutex<Vec<Board>>,
    pub(crate) tasks: Mutex<Vec<Task>>,
    pub(crate) files: Mutex<Vec<ProjectFile>>,
    pub(crate) board_reads: AtomicUsize,
    pub(crate) task_reads: AtomicUsize,
    pub(crate) fail_file_inserts: AtomicBool,
}

#[async_trait]
impl ProjectRepository for FakeContentStore {
    async fn create_project(&self, project: Project) -> AppResult<()> {
        self.projects.lock().await.push(project);
        Ok(())
    }

    async fn find_project(&self, project_id: ProjectId) -> AppResult<Option<Project>> {
        Ok(self
            .projects
            .lock()
            .await
            .iter()
            .find(|project| project.id == project_id)
            .cloned())
    }

    async fn list_projects(&self, project_ids: &[ProjectId]) -> AppResult<Vec<Project>> {
        Ok(self
            .projects
            .lock()
            .await
            .iter()
            .filter(|project| project_ids.contains(&project.id))
            .cloned()
            .collect())
    }

    async fn update_project(&self, project: Project) -> AppResult<()> {
        let mut projects = self.projects.lock().await;
        if let Some(existing) = projects.iter_mut().find(|existing| existing.id == project.id) {
            *existing = project;
        }
        Ok(())
    }

    async fn delete_project(&self, project_id: ProjectId) -> AppResult<()> {
        self.projects
            .lock()
            .await
            .retain(|project| project.id != project_id);
        self.boards
            .lock()
            .await
            .retain(|board| board.project_id != project_id);
        self.tasks
            .lock()
            .await
            .retain(|task| task.project_id != project_id);
        self.files
            .lock()
            .await
            .retain(|file| file.project_id != project_id);
        Ok(())
    }
}

#[async_trait]
impl BoardRepository for FakeContentStore {
    async fn list_boards(&self, project_id: ProjectId) -> AppResult<Vec<Board>> {
        self.board_reads.fetch_add(1, Ordering::SeqCst);
        let mut boards = self
            .boards
            .lock()
            .await
            .iter()
            .filter(|board| board.project_id == project_id)
            .cloned()
            .collect::<Vec<_>>();
        boards.sort_by_key(|board| board.position);
        Ok(boards)
    }

    async fn find_board(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
    ) -> AppResult<Option<Board>> {
        Ok(self
            .boards
            .lock()
            .await
            .iter()
            .find(|board| board.project_id == project_id && board.id == board_id)
            .cloned())
    }

    async fn create_board(&self, board: Board) -> AppResult<()> {
        self.boards.lock().await.push(board);
        Ok(())
    }

    async fn rename_board(
        &self,
        project_id: ProjectId,
        board_id: BoardId,
        name: &str,
    ) -> AppResult<()> {
        let mut boards = self.boards.lock().await;
        if let Some(board) = boards
            .iter_mut()
            .find(|board| board.project_id == project_id && board.id == board_id)
        {
            name.clone_into(&mut board.name);
        }
        Ok(())
    }

    async fn delete_board(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<()> {
        self.boards
            .lock()
            .await
            .retain(|board| !(board.project_id == project_id && board.id == board_id));
        self.tasks.lock().await.retain(|task| task.board_id != board_id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FakeContentStore {
    async fn list_tasks(&self, project_id: ProjectId, board_id: BoardId) -> AppResult<Vec<Task>> {
        self.task_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .filter(|task| task.project_id == project_id && task.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn find_task(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .find(|task| task.project_id == project_id && task.id == task_id)
            .cloned())
    }

    async fn create_task(&self, task: Task) -> AppResult<()> {
        self.tasks.lock().await.push(task);
        Ok(())
    }

    async fn update_task(&self, task: Task) -> AppResult<()> {
        let mut tasks = self.tasks.lock().await;
        if let Some(existing) = tasks.iter_mut().find(|existing| existing.id == task.id) {
            *existing = task;
        }
        Ok(())
    }

    async fn delete_task(&self, project_id: ProjectId, task_id: TaskId) -> AppResult<()> {
        self.tasks
            .lock()
            .await
            .retain(|task| !(task.project_id == project_id && task.id == task_id));
        Ok(())
    }
}

#[async_trait]
impl FileRepository for FakeContentStore {
    async fn list_files(&self, project_id: ProjectId) -> AppResult<Vec<ProjectFile>> {
        Ok(self
            .files
            .lock()
            .await
            .iter()
            .filter(|file| file.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn find_file(
        &self,
        project_id: ProjectId,
        file_id: FileId,
    ) -> AppResult<Option<ProjectFile>> {
        Ok(self
            .files
            .lock()
            .await
            .iter()
            .find(|file| file.project_id == project_id && file.id == file_id)
            .cloned())
    }

    async fn create_file(&self, file: ProjectFile) -> AppResult<()> {
        if self.fail_file_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("file metadata store unavailable".to_owned()));
        }
        self.files.lock().await.push(file);
        Ok(())
    }

    async fn delete_file(&self, project_id: ProjectId, file_id: FileId) -> AppResult<()> {
        self.files
            .lock()
            .await
            .retain(|file| !(file.project_id == project_id && file.id == file_id));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeContentCache {
    pub(crate) boards: Mutex<HashMap<ProjectId, Vec<Board>>>,
    pub(crate) tasks: Mutex<HashMap<BoardId, Vec<Task>>>,
    pub(crate) board_generations: Mutex<HashMap<ProjectId, u64>>,
    pub(crate) task_generations: Mutex<HashMap<BoardId, u64>>,
}

#[async_trait]
impl ProjectContentCache for FakeContentCache {
    async fn get_boards(&self, project_id: ProjectId) -> AppResult<CacheLookup<Board>> {
        if let Some(boards) = self.boards.lock().await.get(&project_id) {
            return Ok(CacheLookup::Hit(boards.clone()));
        }
        let generations = self.board_generations.lock().await;
        Ok(CacheLookup::Miss(
            generations.get(&project_id).copied().unwrap_or_default(),
        ))
    }

    async fn set_boards(
        &self,
        project_id: ProjectId,
        generation: u64,
        boards: &[Board],
        _ttl_seconds: u32,
    ) -> AppResult<()> {
        let generations = self.board_generations.lock().await;
        if generations.get(&project_id).copied().unwrap_or_default() == generation {
            self.boards.lock().await.insert(project_id, boards.to_vec());
        }
        Ok(())
    }

    async fn invalidate_boards(&self, project_id: ProjectId) -> AppResult<()> {
        *self
            .board_generations
            .lock()
            .await
            .entry(project_id)
            .or_default() += 1;
        self.boards.lock().await.remove(&project_id);
        Ok(())
    }

    async fn get_tasks(&self, board_id: BoardId) -> AppResult<CacheLookup<Task>> {
        if let Some(tasks) = self.tasks.lock().await.get(&board_id) {
            return Ok(CacheLookup::Hit(tasks.clone()));
        }
        let generations = self.task_generations.lock().await;
        Ok(CacheLookup::Miss(
            generations.get(&board_id).copied().unwrap_or_default(),
        ))
    }

    async fn set_tasks(
        &self,
        board_id: BoardId,
        generation: u64,
        tasks: &[Task],
        _ttl_seconds: u32,
    ) -> AppResult<()> {
        let generations = self.task_generations.lock().await;
        if generations.get(&board_id).copied().unwrap_or_default() == generation {
            self.tasks.lock().await.insert(board_id, tasks.to_vec());
        }
        Ok(())
    }

    async fn invalidate_tasks(&self, board_id: BoardId) -> AppResult<()> {
        *self
            .task_generations
            .lock()
            .await
            .entry(board_id)
            .or_default() += 1;
        self.tasks.lock().await.remove(&board_id);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeFileStorage {
    pub(crate) objects: Mutex<HashMap<String, Vec<u8>>>,
    pub(crate) fail_deletes: AtomicBool,
}

#[async_trait]
impl FileStorage for FakeFileStorage {
    async fn put(&self, storage_key: &str, bytes: Vec<u8>) -> AppResult<()> {
        self.objects
            .lock()
            .await
            .insert(storage_key.to_owned(), bytes);
        Ok(())
    }

    async fn get(&self, storage_key: &str) -> AppResult<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(storage_key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("object '{storage_key}' is missing")))
    }

    async fn delete(&self, storage_key: &str) -> AppResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Internal(format!("cannot remove '{storage_key}'")));
        }
        self.objects.lock().await.remove(storage_key);
        Ok(())
    }

    async fn purge_project(&self, project_id: ProjectId) -> AppResult<()> {
        let prefix = format!("{project_id}/");
        self.objects
            .lock()
            .await
            .retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAccountRepository {
    pub(crate) accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for FakeAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|account| &account.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|account| &account.username == username)
            .cloned())
    }

    async fn find_by_id(&self, account_id: AccountId) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|account| account.id == account_id)
            .cloned())
    }

    async fn create_account(&self, account: NewAccount) -> AppResult<Account> {
        let account = Account {
            id: AccountId::new(),
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
            is_verified: false,
            is_banned: false,
        };
        self.accounts.lock().await.push(account.clone());
        Ok(account)
    }
}

#[derive(Default)]
pub(crate) struct FakePasswordHasher {
    pub(crate) hash_calls: AtomicUsize,
}

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

pub(crate) fn identity(name: &str) -> AccountIdentity {
    AccountIdentity::new(uuid::Uuid::new_v4(), name, format!("{name}@example.com"))
}

pub(crate) fn id_of(identity: &AccountIdentity) -> AccountId {
    AccountId::from_uuid(identity.account_id())
}

/// Every content service wired over shared fakes.
pub(crate) struct Harness {
    pub(crate) roles: Arc<FakeProjectRoleRepository>,
    pub(crate) audit: Arc<FakeAuditRepository>,
    pub(crate) store: Arc<FakeContentStore>,
    pub(crate) cache: Arc<FakeContentCache>,
    pub(crate) storage: Arc<FakeFileStorage>,
    pub(crate) access: ProjectAccessService,
    pub(crate) projects: ProjectService,
    pub(crate) boards: BoardService,
    pub(crate) tasks: TaskService,
    pub(crate) files: FileService,
}

pub(crate) const TEST_MAX_UPLOAD_BYTES: usize = 1024;

impl Harness {
    pub(crate) fn new() -> Self {
        let roles = Arc::new(FakeProjectRoleRepository::default());
        let audit = Arc::new(FakeAuditRepository::default());
        let store = Arc::new(FakeContentStore::default());
        let cache = Arc::new(FakeContentCache::default());
        let storage = Arc::new(FakeFileStorage::default());

        let access = ProjectAccessService::new(roles.clone(), audit.clone());
        let projects = ProjectService::new(
            access.clone(),
            store.clone(),
            store.clone(),
            storage.clone(),
            audit.clone(),
        )
        .with_content_cache(cache.clone());
        let boards =
            BoardService::new(access.clone(), store.clone()).with_content_cache(cache.clone(), 60);
        let tasks = TaskService::new(access.clone(), store.clone(), store.clone())
            .with_content_cache(cache.clone(), 60);
        let files = FileService::new(
            access.clone(),
            store.clone(),
            store.clone(),
            storage.clone(),
            TEST_MAX_UPLOAD_BYTES,
        );

        Self {
            roles,
            audit,
            store,
            cache,
            storage,
            access,
            projects,
            boards,
            tasks,
            files,
        }
    }

    /// Grants roles directly in the fake store, bypassing service rules.
    pub(crate) async fn seed_roles(
        &self,
        project_id: ProjectId,
        account: &AccountIdentity,
        roles: &[ProjectRole],
    ) {
        let mut rows = self.roles.rows.lock().await;
        for role in roles {
            rows.push(RoleAssignment::new(project_id, id_of(account), *role));
        }
    }
}
