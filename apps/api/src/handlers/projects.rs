use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use tasklane_core::AccountIdentity;
use tasklane_domain::ProjectId;
use uuid::Uuid;

use crate::dto::{AuditEntryResponse, AuditQuery, ProjectDetailsRequest, ProjectResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_projects_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let projects = state
        .project_service
        .list_projects(&actor)
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(Json(projects))
}

pub async fn create_project_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Json(payload): Json<ProjectDetailsRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let project = state
        .project_service
        .create_project(&actor, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

pub async fn get_project_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .project_service
        .get_project(&actor, ProjectId::from_uuid(project_id))
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn update_project_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<ProjectDetailsRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = state
        .project_service
        .update_project(&actor, ProjectId::from_uuid(project_id), payload.into())
        .await?;

    Ok(Json(ProjectResponse::from(project)))
}

pub async fn delete_project_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .project_service
        .delete_project(&actor, ProjectId::from_uuid(project_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/projects/{project_id}/audit - Newest audit entries, admins only.
pub async fn list_audit_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<Json<Vec<AuditEntryResponse>>> {
    let entries = state
        .project_service
        .list_audit_events(&actor, ProjectId::from_uuid(project_id), query.limit)
        .await?
        .into_iter()
        .map(AuditEntryResponse::from)
        .collect();

    Ok(Json(entries))
}
