use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tasklane_core::AccountIdentity;
use tasklane_domain::{BoardId, ProjectId, TaskId};
use uuid::Uuid;

use crate::dto::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_tasks_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, board_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state
        .task_service
        .list_tasks(
            &actor,
            ProjectId::from_uuid(project_id),
            BoardId::from_uuid(board_id),
        )
        .await?
        .into_iter()
        .map(TaskResponse::from)
        .collect();

    Ok(Json(tasks))
}

pub async fn create_task_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, board_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let task = state
        .task_service
        .create_task(
            &actor,
            ProjectId::from_uuid(project_id),
            BoardId::from_uuid(board_id),
            payload.try_into()?,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

pub async fn get_task_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .task_service
        .get_task(
            &actor,
            ProjectId::from_uuid(project_id),
            TaskId::from_uuid(task_id),
        )
        .await?;

    Ok(Json(TaskResponse::from(task)))
}

pub async fn update_task_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state
        .task_service
        .update_task(
            &actor,
            ProjectId::from_uuid(project_id),
            TaskId::from_uuid(task_id),
            payload.try_into()?,
        )
        .await?;

    Ok(Json(TaskResponse::from(task)))
}

pub async fn delete_task_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .task_service
        .delete_task(
            &actor,
            ProjectId::from_uuid(project_id),
            TaskId::from_uuid(task_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
