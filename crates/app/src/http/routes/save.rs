use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::state::AppState;
use viewfinder_core::domain::snapshot::Snapshot;
use viewfinder_core::error::CoreError;
use viewfinder_core::types::export_format::ExportFormat;
use viewfinder_infra::archive::ArchiveError;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub status: &'static str,
    pub file: String,
}

#[derive(Debug, Error)]
pub enum SaveApiError {
    #[error("{0}")]
    InvalidSnapshot(#[from] CoreError),
    #[error("unable to save snapshot: {0}")]
    Archive(#[from] ArchiveError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn save_snapshot(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, SaveApiError> {
    request.snapshot.validate()?;
    let file = state
        .archive
        .save(&request.snapshot, request.format, Utc::now())?;
    info!(%file, format = request.format.key(), items = request.snapshot.items.len(), "snapshot saved");
    Ok(Json(SaveResponse {
        status: "ok",
        file,
    }))
}

impl IntoResponse for SaveApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            SaveApiError::InvalidSnapshot(_) => StatusCode::BAD_REQUEST,
            SaveApiError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
