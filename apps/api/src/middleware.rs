use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tasklane_core::{AccountIdentity, AppError};
use tower_sessions::Session;

use crate::auth::SESSION_ACCOUNT_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

/// Resolves the current principal from the session and exposes it to handlers.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<AccountIdentity>(SESSION_ACCOUNT_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        check_origin(request.headers(), &state.frontend_url)?;
    }

    Ok(next.run(request).await)
}

fn check_origin(headers: &HeaderMap, allowed_origin: &str) -> Result<(), AppError> {
    if let Some(fetch_site) = headers.get("sec-fetch-site")
        && fetch_site == HeaderValue::from_static("cross-site")
    {
        return Err(AppError::Unauthorized("cross-site request blocked".to_owned()));
    }

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if origin != allowed_origin && !referer.starts_with(allowed_origin) {
        return Err(AppError::Unauthorized("origin validation failed".to_owned()));
    }

    Ok(())
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, Method, header};

    use super::{check_origin, is_state_changing_method};

    const FRONTEND: &str = "http://localhost:3000";

    #[test]
    fn only_mutating_methods_are_checked() {
        assert!(is_state_changing_method(&Method::POST));
        assert!(is_state_changing_method(&Method::DELETE));
        assert!(!is_state_changing_method(&Method::GET));
        assert!(!is_state_changing_method(&Method::OPTIONS));
    }

    #[test]
    fn matching_origin_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static(FRONTEND));
        assert!(check_origin(&headers, FRONTEND).is_ok());
    }

    #[test]
    fn matching_referer_is_accepted_without_origin() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_static("http://localhost:3000/projects"),
        );
        assert!(check_origin(&headers, FRONTEND).is_ok());
    }

    #[test]
    fn foreign_or_cross_site_requests_are_rejected() {
        let mut foreign = HeaderMap::new();
        foreign.insert(header::ORIGIN, HeaderValue::from_static("https://evil.test"));
        assert!(check_origin(&foreign, FRONTEND).is_err());

        let mut cross_site = HeaderMap::new();
        cross_site.insert(header::ORIGIN, HeaderValue::from_static(FRONTEND));
        cross_site.insert("sec-fetch-site", HeaderValue::from_static("cross-site"));
        assert!(check_origin(&cross_site, FRONTEND).is_err());

        assert!(check_origin(&HeaderMap::new(), FRONTEND).is_err());
    }
}
