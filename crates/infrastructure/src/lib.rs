//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_project_content_cache;
mod in_memory_project_role_repository;
mod local_file_storage;
mod postgres_account_repository;
mod postgres_audit_repository;
mod postgres_project_repository;
mod postgres_project_role_repository;
mod redis_project_content_cache;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_project_content_cache::InMemoryProjectContentCache;
pub use in_memory_project_role_repository::InMemoryProjectRoleRepository;
pub use local_file_storage::LocalFileStorage;
pub use postgres_account_repository::PostgresAccountRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_project_repository::PostgresProjectRepository;
pub use postgres_project_role_repository::PostgresProjectRoleRepository;
pub use redis_project_content_cache::RedisProjectContentCache;
