//! Application services and ports.

#![forbid(unsafe_code)]

mod account_service;
mod audit_ports;
mod board_service;
mod file_service;
mod project_access_ports;
mod project_access_service;
mod project_ports;
mod project_service;
mod task_service;

#[cfg(test)]
mod test_support;

pub use account_service::{
    AccountRepository, AccountService, NewAccount, PasswordHasher, RegisterParams, identity_of,
};
pub use audit_ports::{AuditEntry, AuditEvent, AuditRepository};
pub use board_service::BoardService;
pub use file_service::FileService;
pub use project_access_ports::{ProjectMember, ProjectRoleRepository, RoleAssignmentChanges};
pub use project_access_service::{ProjectAccessService, actor_id};
pub use project_ports::{
    BoardRepository, CacheLookup, CreateTaskInput, FileRepository, FileStorage,
    ProjectContentCache, ProjectDetailsInput, ProjectRepository, TaskRepository, UpdateTaskInput,
    UploadFileInput,
};
pub use project_service::ProjectService;
pub use task_service::TaskService;
