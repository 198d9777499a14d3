use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::state::AppState;
use viewfinder_infra::archive::{ArchiveEntry, ArchiveError};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub items: Vec<ArchiveEntry>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
    pub deleted: usize,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ArchiveApiError(#[from] ArchiveError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn list_snapshots(
    State(state): State<AppState>,
) -> Result<Json<ListResponse>, ArchiveApiError> {
    let items = state.archive.list()?;
    Ok(Json(ListResponse { items }))
}

pub async fn clear_archive(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, ArchiveApiError> {
    let deleted = state.archive.clear()?;
    info!(deleted, "archive cleared");
    Ok(Json(ClearResponse {
        status: "ok",
        deleted,
    }))
}

pub async fn download_snapshot(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ArchiveApiError> {
    let bytes = state.archive.read(&filename)?;
    let headers = [
        (header::CONTENT_TYPE, content_type_for(&filename).to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        _ => "text/plain; charset=utf-8",
    }
}

impl IntoResponse for ArchiveApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ArchiveError::InvalidName => StatusCode::BAD_REQUEST,
            ArchiveError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
