//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod account;
mod audit;
mod project;
mod role;

pub use account::{
    Account, AccountId, EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH,
    USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH, Username, validate_password,
};
pub use audit::AuditAction;
pub use project::{
    BOARD_NAME_MAX_LENGTH, Board, BoardId, FILE_NAME_MAX_LENGTH, FileId, PROJECT_NAME_MAX_LENGTH,
    Project, ProjectFile, ProjectId, TASK_TITLE_MAX_LENGTH, Task, TaskId, TaskStatus,
    normalize_description, normalize_name, validate_file_name,
};
pub use role::{ProjectRole, RoleAssignment};
