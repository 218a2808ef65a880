use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use tasklane_core::AccountIdentity;
use tasklane_domain::{AccountId, ProjectId, ProjectRole};
use uuid::Uuid;

use crate::dto::{AddMemberRequest, ChangeOwnerRequest, GrantRoleRequest, ProjectMemberResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_members_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ProjectMemberResponse>>> {
    let members = state
        .project_access_service
        .list_members(&actor, ProjectId::from_uuid(project_id))
        .await?
        .into_iter()
        .map(ProjectMemberResponse::from)
        .collect();

    Ok(Json(members))
}

/// Roles the caller holds in the project; empty when it holds none.
pub async fn my_roles_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<String>>> {
    let roles = state
        .project_access_service
        .roles_of(&actor, ProjectId::from_uuid(project_id))
        .await?
        .iter()
        .map(|role| role.as_str().to_owned())
        .collect();

    Ok(Json(roles))
}

pub async fn add_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> ApiResult<StatusCode> {
    state
        .project_access_service
        .add_member(
            &actor,
            ProjectId::from_uuid(project_id),
            AccountId::from_uuid(payload.account_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_member_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, account_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .project_access_service
        .revoke_all_roles(
            &actor,
            ProjectId::from_uuid(project_id),
            AccountId::from_uuid(account_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn change_owner_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<ChangeOwnerRequest>,
) -> ApiResult<StatusCode> {
    state
        .project_access_service
        .change_owner(
            &actor,
            ProjectId::from_uuid(project_id),
            AccountId::from_uuid(payload.account_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn grant_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, account_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<GrantRoleRequest>,
) -> ApiResult<StatusCode> {
    let role = ProjectRole::from_transport(payload.role.as_str())?;
    state
        .project_access_service
        .grant_role(
            &actor,
            ProjectId::from_uuid(project_id),
            AccountId::from_uuid(account_id),
            role,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn revoke_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, account_id, role)): Path<(Uuid, Uuid, String)>,
) -> ApiResult<StatusCode> {
    let role = ProjectRole::from_transport(role.as_str())?;
    state
        .project_access_service
        .revoke_role(
            &actor,
            ProjectId::from_uuid(project_id),
            AccountId::from_uuid(account_id),
            role,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
