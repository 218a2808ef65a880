use std::sync::Arc;

use tasklane_application::ProjectContentCache;
use tasklane_core::AppError;
use tasklane_infrastructure::{InMemoryProjectContentCache, RedisProjectContentCache};
use tracing::info;

const CONTENT_CACHE_KEY_PREFIX: &str = "tasklane:content";

/// Opens a client for `REDIS_URL`; only `redis://` and `rediss://` are accepted.
pub(super) fn build_redis_client(redis_url: &str) -> Result<redis::Client, AppError> {
    let redis_url = redis_url.trim();
    if !(redis_url.starts_with("redis://") || redis_url.starts_with("rediss://")) {
        return Err(AppError::Validation(
            "REDIS_URL must start with redis:// or rediss://".to_owned(),
        ));
    }

    redis::Client::open(redis_url)
        .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))
}

pub(super) fn build_project_content_cache(
    redis_client: Option<redis::Client>,
) -> Arc<dyn ProjectContentCache> {
    match redis_client {
        Some(redis_client) => {
            info!(
                prefix = CONTENT_CACHE_KEY_PREFIX,
                "project content cache backed by redis"
            );
            Arc::new(RedisProjectContentCache::new(
                redis_client,
                CONTENT_CACHE_KEY_PREFIX,
            ))
        }
        None => {
            info!("project content cache kept in process memory");
            Arc::new(InMemoryProjectContentCache::new())
        }
    }
}
