use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::state::AppState;
use viewfinder_core::domain::search::SearchRequest;
use viewfinder_core::domain::video::VideoResult;
use viewfinder_core::error::CoreError;
use viewfinder_infra::youtube::YouTubeError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Vec<VideoResult>,
    pub quota_used: u32,
}

#[derive(Debug, Error)]
pub enum SearchApiError {
    #[error("{0}")]
    Validation(#[from] CoreError),
    #[error("search provider is not configured")]
    ProviderUnavailable,
    #[error("search provider error: {0}")]
    Upstream(YouTubeError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, SearchApiError> {
    let request = request.normalize(state.config.max_results)?;
    let youtube = state
        .youtube
        .as_ref()
        .ok_or(SearchApiError::ProviderUnavailable)?;
    let outcome = youtube
        .search(&request, Utc::now())
        .await
        .map_err(SearchApiError::Upstream)?;
    debug!(
        query = %request.query,
        topic = request.topic.key(),
        results = outcome.items.len(),
        quota = outcome.quota_used,
        "search complete"
    );
    Ok(Json(SearchResponse {
        items: outcome.items,
        quota_used: outcome.quota_used,
    }))
}

impl IntoResponse for SearchApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            SearchApiError::Validation(_) => StatusCode::BAD_REQUEST,
            SearchApiError::ProviderUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            SearchApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
