use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::state::AppState;
use viewfinder_core::domain::prefs::SearchDefaults;
use viewfinder_infra::prefs::PrefsError;

#[derive(Debug, Serialize)]
pub struct PrefsResponse {
    pub status: &'static str,
}

#[derive(Debug, Error)]
#[error("unable to persist preferences: {0}")]
pub struct PrefsApiError(#[from] PrefsError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn get_prefs(State(state): State<AppState>) -> Json<SearchDefaults> {
    Json(state.prefs.load())
}

pub async fn put_prefs(
    State(state): State<AppState>,
    Json(defaults): Json<SearchDefaults>,
) -> Result<Json<PrefsResponse>, PrefsApiError> {
    let defaults = defaults.clamped(state.config.max_results);
    state.prefs.store(&defaults)?;
    Ok(Json(PrefsResponse { status: "ok" }))
}

impl IntoResponse for PrefsApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
