//! Transport types shared with the web client.

mod auth;
mod common;
mod content;
mod projects;

pub use auth::{AccountResponse, LoginRequest, RegisterRequest};
pub use common::{HealthDependencyStatus, HealthResponse};
pub use content::{
    BoardNameRequest, BoardResponse, CreateTaskRequest, FileResponse, TaskResponse,
    UpdateTaskRequest,
};
pub use projects::{
    AddMemberRequest, AuditEntryResponse, AuditQuery, ChangeOwnerRequest, GrantRoleRequest,
    ProjectDetailsRequest, ProjectMemberResponse, ProjectResponse,
};
