use axum::Json;
use axum::extract::{Extension, Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tasklane_application::UploadFileInput;
use tasklane_core::{AccountIdentity, AppError};
use tasklane_domain::{FileId, ProjectId, TaskId};
use uuid::Uuid;

use crate::dto::FileResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_files_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<FileResponse>>> {
    let files = state
        .file_service
        .list_files(&actor, ProjectId::from_uuid(project_id))
        .await?
        .into_iter()
        .map(FileResponse::from)
        .collect();

    Ok(Json(files))
}

/// Accepts a multipart form with a `file` part and an optional `task_id` part.
///
/// The caller's Update role is checked before the body is read.
pub async fn upload_file_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path(project_id): Path<Uuid>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<FileResponse>)> {
    let project_id = ProjectId::from_uuid(project_id);
    state
        .file_service
        .authorize_upload(&actor, project_id)
        .await?;

    let input = read_upload(multipart).await?;
    let file = state
        .file_service
        .upload_file(&actor, project_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(FileResponse::from(file))))
}

pub async fn download_file_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, file_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Response> {
    let (file, bytes) = state
        .file_service
        .download_file(
            &actor,
            ProjectId::from_uuid(project_id),
            FileId::from_uuid(file_id),
        )
        .await?;

    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&content_disposition(&file.file_name))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

pub async fn delete_file_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<AccountIdentity>,
    Path((project_id, file_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    state
        .file_service
        .delete_file(
            &actor,
            ProjectId::from_uuid(project_id),
            FileId::from_uuid(file_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadFileInput, AppError> {
    let mut task_id = None;
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::Validation(format!("invalid multipart body: {error}")))?
    {
        match field.name() {
            Some("task_id") => {
                let value = field.text().await.map_err(|error| {
                    AppError::Validation(format!("invalid task_id field: {error}"))
                })?;
                task_id = parse_task_id(&value)?;
            }
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|error| {
                    AppError::Validation(format!("failed to read uploaded file: {error}"))
                })?;
                upload = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, content_type, bytes) = upload
        .ok_or_else(|| AppError::Validation("multipart body has no 'file' part".to_owned()))?;

    Ok(UploadFileInput {
        task_id,
        file_name,
        content_type,
        bytes,
    })
}

fn parse_task_id(value: &str) -> Result<Option<TaskId>, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    Uuid::parse_str(value)
        .map(|uuid| Some(TaskId::from_uuid(uuid)))
        .map_err(|error| AppError::Validation(format!("invalid task_id: {error}")))
}

fn content_disposition(file_name: &str) -> String {
    let escaped = file_name
        .chars()
        .filter(|character| !character.is_control())
        .map(|character| match character {
            '"' | '\\' => '_',
            other => other,
        })
        .collect::<String>();

    format!("attachment; filename=\"{escaped}\"")
}
