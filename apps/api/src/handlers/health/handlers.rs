use super::checks::{check_postgres, check_redis};
use super::*;

/// GET /health - Report storage dependency status.
///
/// Redis only serves the listing cache, so an unreachable Redis degrades the
/// report without failing readiness.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres = check_postgres(state.postgres_pool.clone()).await;
    let redis = check_redis(state.redis_client.clone()).await;

    let ready = postgres.status == "ok";
    let status = if ready && redis.status != "error" {
        "ok"
    } else {
        "degraded"
    };
    let http_status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(HealthResponse {
            status,
            ready,
            postgres,
            redis,
        }),
    )
}
