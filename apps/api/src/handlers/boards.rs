use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tasklane_core::AccountIdentity;
use tasklane_domain::{BoardId, ProjectId};
use uuid::Uuid;

use crate::dto::{BoardNameRequest, BoardResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_boards_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<BoardResponse>>> {
    let boards = state
        .board_service
        .list_boards(&actor, ProjectId::from_uuid(project_id))
        .await?
        .into_iter()
        .map(BoardResponse::from)
        .collect();

    Ok(Json(boards))
}

pub async fn create_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<BoardNameRequest>,
) -> ApiResult<(StatusCode, Json<BoardResponse>)> {
    let board = state
        .board_service
        .create_board(&actor, ProjectId::from_uuid(project_id), &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(BoardResponse::from(board))))
}

pub async fn rename_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, board_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<BoardNameRequest>,
) -> ApiResult<Json<BoardResponse>> {
    let board = state
        .board_service
        .rename_board(
            &actor,
            ProjectId::from_uuid(project_id),
            BoardId::from_uuid(board_id),
            &payload.name,
        )
        .await?;

    Ok(Json(BoardResponse::from(board)))
}

pub async fn delete_board_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, board_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .board_service
        .delete_board(
            &actor,
            ProjectId::from_uuid(project_id),
            BoardId::from_uuid(board_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
