use tasklane_domain::{AccountId, BoardId, TaskId, TaskStatus};

/// Input payload for project creation and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetailsInput {
    /// Project display name.
    pub name: String,
    /// Optional project description.
    pub description: Option<String>,
}

/// Input payload for task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskInput {
    /// Task title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Initial status, `todo` when absent.
    pub status: Option<TaskStatus>,
    /// Optional assignee, must participate in the project.
    pub assignee_id: Option<AccountId>,
}

/// Input payload replacing the editable fields of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskInput {
    /// Board the task should be placed on.
    pub board_id: BoardId,
    /// Task title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Progress state.
    pub status: TaskStatus,
    /// Optional assignee, must participate in the project.
    pub assignee_id: Option<AccountId>,
}

/// Input payload for a file upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileInput {
    /// Optional task the file is attached to.
    pub task_id: Option<TaskId>,
    /// Original file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}
