use std::sync::Arc;

use sqlx::PgPool;
use tasklane_application::{
    AccountService, BoardRepository, BoardService, FileRepository, FileService, FileStorage,
    ProjectAccessService, ProjectRepository, ProjectService, TaskRepository, TaskService,
};
use tasklane_core::AppError;
use tasklane_infrastructure::{
    Argon2PasswordHasher, LocalFileStorage, PostgresAccountRepository, PostgresAuditRepository,
    PostgresProjectRepository, PostgresProjectRoleRepository,
};

use crate::api_config::ApiConfig;
use crate::state::AppState;

mod caches;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let redis_client = config
        .redis_url
        .as_deref()
        .map(caches::build_redis_client)
        .transpose()?;

    let audit_repository = Arc::new(PostgresAuditRepository::new(pool.clone()));
    let project_access_service = ProjectAccessService::new(
        Arc::new(PostgresProjectRoleRepository::new(pool.clone())),
        audit_repository.clone(),
    );

    let content_store = Arc::new(PostgresProjectRepository::new(pool.clone()));
    let project_repository: Arc<dyn ProjectRepository> = content_store.clone();
    let board_repository: Arc<dyn BoardRepository> = content_store.clone();
    let task_repository: Arc<dyn TaskRepository> = content_store.clone();
    let file_repository: Arc<dyn FileRepository> = content_store;
    let file_storage: Arc<dyn FileStorage> =
        Arc::new(LocalFileStorage::new(config.file_storage_dir.clone()));
    let content_cache = caches::build_project_content_cache(redis_client.clone());

    let account_service = AccountService::new(
        Arc::new(PostgresAccountRepository::new(pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
    );

    Ok(AppState {
        account_service,
        project_service: ProjectService::new(
            project_access_service.clone(),
            project_repository,
            board_repository.clone(),
            file_storage.clone(),
            audit_repository,
        )
        .with_content_cache(content_cache.clone()),
        board_service: BoardService::new(project_access_service.clone(), board_repository.clone())
            .with_content_cache(content_cache.clone(), config.cache_ttl_seconds),
        task_service: TaskService::new(
            project_access_service.clone(),
            task_repository.clone(),
            board_repository,
        )
        .with_content_cache(content_cache, config.cache_ttl_seconds),
        file_service: FileService::new(
            project_access_service.clone(),
            file_repository,
            task_repository,
            file_storage,
            config.max_upload_bytes,
        ),
        project_access_service,
        frontend_url: config.frontend_url.clone(),
        max_upload_bytes: config.max_upload_bytes,
        postgres_pool: pool,
        redis_client,
    })
}
