use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post, put};
use tasklane_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

/// Slack for multipart boundaries and the `task_id` part on top of the file size.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(
    app_state: AppState,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let upload_limit = app_state
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let file_routes = Router::new()
        .route(
            "/api/projects/{project_id}/files",
            get(handlers::files::list_files_handler).post(handlers::files::upload_file_handler),
        )
        .route(
            "/api/projects/{project_id}/files/{file_id}",
            get(handlers::files::download_file_handler)
                .delete(handlers::files::delete_file_handler),
        )
        .layer(DefaultBodyLimit::max(upload_limit));

    let protected_routes = Router::new()
        .route(
            "/api/projects",
            get(handlers::projects::list_projects_handler)
                .post(handlers::projects::create_project_handler),
        )
        .route(
            "/api/projects/{project_id}",
            get(handlers::projects::get_project_handler)
                .put(handlers::projects::update_project_handler)
                .delete(handlers::projects::delete_project_handler),
        )
        .route(
            "/api/projects/{project_id}/members",
            get(handlers::members::list_members_handler)
                .post(handlers::members::add_member_handler),
        )
        .route(
            "/api/projects/{project_id}/members/{account_id}",
            delete(handlers::members::remove_member_handler),
        )
        .route(
            "/api/projects/{project_id}/members/{account_id}/roles",
            post(handlers::members::grant_role_handler),
        )
        .route(
            "/api/projects/{project_id}/members/{account_id}/roles/{role}",
            delete(handlers::members::revoke_role_handler),
        )
        .route(
            "/api/projects/{project_id}/owner",
            put(handlers::members::change_owner_handler),
        )
        .route(
            "/api/projects/{project_id}/roles",
            get(handlers::members::my_roles_handler),
        )
        .route(
            "/api/projects/{project_id}/audit",
            get(handlers::projects::list_audit_handler),
        )
        .route(
            "/api/projects/{project_id}/boards",
            get(handlers::boards::list_boards_handler)
                .post(handlers::boards::create_board_handler),
        )
        .route(
            "/api/projects/{project_id}/boards/{board_id}",
            put(handlers::boards::rename_board_handler)
                .delete(handlers::boards::delete_board_handler),
        )
        .route(
            "/api/projects/{project_id}/boards/{board_id}/tasks",
            get(handlers::tasks::list_tasks_handler).post(handlers::tasks::create_task_handler),
        )
        .route(
            "/api/projects/{project_id}/tasks/{task_id}",
            get(handlers::tasks::get_task_handler)
                .put(handlers::tasks::update_task_handler)
                .delete(handlers::tasks::delete_task_handler),
        )
        .merge(file_routes)
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(&app_state.frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
