//! Projects and the content they contain.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklane_core::{AppError, NonEmptyString};
use uuid::Uuid;

use crate::AccountId;

macro_rules! uuid_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID value.
            #[must_use]
            pub fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID value.
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{}", self.0)
            }
        }
    };
}

uuid_identifier!(
    /// Unique identifier for a project.
    ProjectId
);
uuid_identifier!(
    /// Unique identifier for a board.
    BoardId
);
uuid_identifier!(
    /// Unique identifier for a task.
    TaskId
);
uuid_identifier!(
    /// Unique identifier for an uploaded file.
    FileId
);

/// Container of boards, tasks and files, owned by exactly one account once claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable project identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Ordered column of tasks inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Stable board identifier.
    pub id: BoardId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Display name.
    pub name: String,
    /// Sort position within the project.
    pub position: i32,
}

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(AppError::Validation(format!(
                "unknown task status value '{value}'"
            ))),
        }
    }
}

/// Unit of work placed on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Board the task is placed on.
    pub board_id: BoardId,
    /// Short title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Progress state.
    pub status: TaskStatus,
    /// Account the task is assigned to.
    pub assignee_id: Option<AccountId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Metadata of a file attached to a project or one of its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Stable file identifier.
    pub id: FileId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Task the file is attached to, if any.
    pub task_id: Option<TaskId>,
    /// Original file name.
    pub file_name: String,
    /// MIME content type reported by the uploader.
    pub content_type: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// Opaque key used by file storage.
    pub storage_key: String,
    /// Account that uploaded the file.
    pub uploaded_by: AccountId,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}

/// Maximum length of a project name.
pub const PROJECT_NAME_MAX_LENGTH: usize = 120;

/// Maximum length of a board name.
pub const BOARD_NAME_MAX_LENGTH: usize = 80;

/// Maximum length of a task title.
pub const TASK_TITLE_MAX_LENGTH: usize = 200;

/// Trims a display name and enforces non-emptiness and a length limit.
///
/// `label` names the field in validation messages.
pub fn normalize_name(label: &str, value: &str, max_length: usize) -> Result<String, AppError> {
    let trimmed = NonEmptyString::new(value.trim())
        .map_err(|_| AppError::Validation(format!("{label} must not be empty")))?;

    if trimmed.as_str().chars().count() > max_length {
        return Err(AppError::Validation(format!(
            "{label} must not exceed {max_length} characters"
        )));
    }

    Ok(trimmed.into())
}

/// Trims an optional description, mapping blank values to `None`.
#[must_use]
pub fn normalize_description(value: Option<String>) -> Option<String> {
    value
        .map(|description| description.trim().to_owned())
        .filter(|description| !description.is_empty())
}

/// Maximum length of a file name kept in metadata.
pub const FILE_NAME_MAX_LENGTH: usize = 255;

/// Validates an uploaded file name and returns the sanitized value.
///
/// Path separators are rejected so the name can never escape a storage directory.
pub fn validate_file_name(value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "file name must not be empty".to_owned(),
        ));
    }

    if trimmed.chars().count() > FILE_NAME_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "file name must not exceed {FILE_NAME_MAX_LENGTH} characters"
        )));
    }

    if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
        return Err(AppError::Validation(format!(
            "file name '{trimmed}' is not allowed"
        )));
    }

    Ok(trimmed.to_owned())
}
