//! Ports for project content: persistence, listing cache and file bytes.

mod cache;
mod inputs;
mod repositories;
mod storage;

pub use cache::{CacheLookup, ProjectContentCache};
pub use inputs::{CreateTaskInput, ProjectDetailsInput, UpdateTaskInput, UploadFileInput};
pub use repositories::{BoardRepository, FileRepository, ProjectRepository, TaskRepository};
pub use storage::FileStorage;
