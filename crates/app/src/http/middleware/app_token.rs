use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{Request, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::state::AppState;

const TOKEN_HEADER: &str = "x-app-token";
const TOKEN_QUERY_PARAM: &str = "token";

#[derive(Debug, Error)]
pub enum AppTokenError {
    #[error("invalid or missing app token")]
    Unauthorized,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Gate for mutating and archive-serving routes. With no token configured
/// the guard is a no-op; otherwise the caller must present the shared
/// secret in the `X-App-Token` header or, for direct download links, the
/// `token` query parameter.
pub async fn require_app_token(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppTokenError> {
    let provided = extract_header_token(&request)
        .or_else(|| extract_query_token(request.uri()));
    if authorize(state.config.app_token.as_deref(), provided.as_deref()) {
        Ok(next.run(request).await)
    } else {
        Err(AppTokenError::Unauthorized)
    }
}

pub fn is_enabled(configured: Option<&str>) -> bool {
    configured
        .map(str::trim)
        .is_some_and(|value| !value.is_empty())
}

pub fn authorize(configured: Option<&str>, provided: Option<&str>) -> bool {
    let Some(expected) = configured.map(str::trim).filter(|value| !value.is_empty()) else {
        return true;
    };
    let Some(candidate) = provided else {
        return false;
    };
    // Compare digests so the check does not short-circuit on the secret.
    Sha256::digest(expected.as_bytes()) == Sha256::digest(candidate.as_bytes())
}

fn extract_header_token<B>(request: &Request<B>) -> Option<String> {
    let value = request.headers().get(TOKEN_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn extract_query_token(uri: &Uri) -> Option<String> {
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri).ok()?;
    params.get(TOKEN_QUERY_PARAM).cloned()
}

impl IntoResponse for AppTokenError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::{authorize, extract_query_token, is_enabled};
    use axum::http::Uri;

    #[test]
    fn no_configured_token_authorizes_everything() {
        assert!(authorize(None, None));
        assert!(authorize(None, Some("")));
        assert!(authorize(None, Some("anything")));
        assert!(authorize(Some("  "), Some("anything")));
    }

    #[test]
    fn configured_token_requires_exact_match() {
        assert!(authorize(Some("secret"), Some("secret")));
        assert!(!authorize(Some("secret"), Some("Secret")));
        assert!(!authorize(Some("secret"), Some("")));
        assert!(!authorize(Some("secret"), None));
    }

    #[test]
    fn enabled_only_with_non_blank_token() {
        assert!(!is_enabled(None));
        assert!(!is_enabled(Some("  ")));
        assert!(is_enabled(Some("secret")));
    }

    #[test]
    fn query_token_is_extracted_and_decoded() {
        let uri: Uri = "/archive/a.txt?token=se%20cret".parse().unwrap();
        assert_eq!(extract_query_token(&uri), Some("se cret".to_string()));
        let bare: Uri = "/archive/a.txt".parse().unwrap();
        assert_eq!(extract_query_token(&bare), None);
    }
}
