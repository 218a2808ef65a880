use serde::{Deserialize, Serialize};
use tasklane_application::{CreateTaskInput, UpdateTaskInput};
use tasklane_core::AppError;
use tasklane_domain::{AccountId, Board, BoardId, ProjectFile, Task, TaskStatus};
use ts_rs::TS;
use uuid::Uuid;

/// Incoming payload for board creation and rename.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/board-name-request.ts"
)]
pub struct BoardNameRequest {
    pub name: String,
}

/// API representation of a board.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/board-response.ts"
)]
pub struct BoardResponse {
    pub board_id: String,
    pub project_id: String,
    pub name: String,
    pub position: i32,
}

impl From<Board> for BoardResponse {
    fn from(board: Board) -> Self {
        Self {
            board_id: board.id.to_string(),
            project_id: board.project_id.to_string(),
            name: board.name,
            position: board.position,
        }
    }
}

/// Incoming payload for task creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-task-request.ts"
)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    #[ts(type = "string | null")]
    pub assignee_id: Option<Uuid>,
}

impl TryFrom<CreateTaskRequest> for CreateTaskInput {
    type Error = AppError;

    fn try_from(request: CreateTaskRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            title: request.title,
            description: request.description,
            status: request
                .status
                .as_deref()
                .map(str::parse::<TaskStatus>)
                .transpose()?,
            assignee_id: request.assignee_id.map(AccountId::from_uuid),
        })
    }
}

/// Incoming payload for task replacement.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-task-request.ts"
)]
pub struct UpdateTaskRequest {
    #[ts(type = "string")]
    pub board_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    #[ts(type = "string | null")]
    pub assignee_id: Option<Uuid>,
}

impl TryFrom<UpdateTaskRequest> for UpdateTaskInput {
    type Error = AppError;

    fn try_from(request: UpdateTaskRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            board_id: BoardId::from_uuid(request.board_id),
            title: request.title,
            description: request.description,
            status: request.status.parse()?,
            assignee_id: request.assignee_id.map(AccountId::from_uuid),
        })
    }
}

/// API representation of a task.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/task-response.ts"
)]
pub struct TaskResponse {
    pub task_id: String,
    pub project_id: String,
    pub board_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub assignee_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.id.to_string(),
            project_id: task.project_id.to_string(),
            board_id: task.board_id.to_string(),
            title: task.title,
            description: task.description,
            status: task.status.as_str().to_owned(),
            assignee_id: task.assignee_id.map(|id| id.to_string()),
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

/// API representation of stored file metadata.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/file-response.ts"
)]
pub struct FileResponse {
    pub file_id: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_by: String,
    pub created_at: String,
}

impl From<ProjectFile> for FileResponse {
    fn from(file: ProjectFile) -> Self {
        Self {
            file_id: file.id.to_string(),
            project_id: file.project_id.to_string(),
            task_id: file.task_id.map(|id| id.to_string()),
            file_name: file.file_name,
            content_type: file.content_type,
            size_bytes: file.size_bytes,
            uploaded_by: file.uploaded_by.to_string(),
            created_at: file.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use tasklane_application::{CreateTaskInput, UpdateTaskInput};
    use tasklane_domain::TaskStatus;
    use uuid::Uuid;

    use super::{CreateTaskRequest, UpdateTaskRequest};

    #[test]
    fn create_request_defaults_status_when_absent() {
        let input = CreateTaskInput::try_from(CreateTaskRequest {
            title: "Write docs".to_owned(),
            description: None,
            status: None,
            assignee_id: None,
        });

        assert!(matches!(input, Ok(CreateTaskInput { status: None, .. })));
    }

    #[test]
    fn update_request_parses_status() {
        let input = UpdateTaskInput::try_from(UpdateTaskRequest {
            board_id: Uuid::new_v4(),
            title: "Write docs".to_owned(),
            description: None,
            status: "in_progress".to_owned(),
            assignee_id: Some(Uuid::new_v4()),
        });

        assert!(matches!(
            input,
            Ok(UpdateTaskInput {
                status: TaskStatus::InProgress,
                assignee_id: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let input = CreateTaskInput::try_from(CreateTaskRequest {
            title: "Write docs".to_owned(),
            description: None,
            status: Some("blocked".to_owned()),
            assignee_id: None,
        });

        assert!(input.is_err());
    }
}
