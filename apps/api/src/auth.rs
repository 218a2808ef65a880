//! Cookie-session authentication endpoints.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use tasklane_application::RegisterParams;
use tasklane_core::{AccountIdentity, AppError};
use tower_sessions::Session;
use tracing::info;

use crate::dto::{AccountResponse, LoginRequest, RegisterRequest};
use crate::error::ApiResult;
use crate::state::AppState;

/// Session key holding the authenticated [`AccountIdentity`].
pub const SESSION_ACCOUNT_KEY: &str = "account_identity";

/// POST /auth/register - Create a new account.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AccountResponse>)> {
    let identity = state
        .account_service
        .register(RegisterParams {
            email: payload.email,
            username: payload.username,
            password: payload.password,
        })
        .await?;

    info!(account_id = %identity.account_id(), "account registered");
    Ok((StatusCode::CREATED, Json(AccountResponse::from(identity))))
}

/// POST /auth/login - Authenticate with email and password.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AccountResponse>> {
    let identity = state
        .account_service
        .login(&payload.email, &payload.password)
        .await?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;
    session
        .insert(SESSION_ACCOUNT_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    Ok(Json(AccountResponse::from(identity)))
}

/// POST /auth/logout - Drop the current session.
pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - Return the authenticated account as currently stored.
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AccountIdentity>,
) -> ApiResult<Json<AccountResponse>> {
    let identity = state.account_service.current_identity(&identity).await?;
    Ok(Json(AccountResponse::from(identity)))
}
