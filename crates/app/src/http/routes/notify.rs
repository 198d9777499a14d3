use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::state::AppState;
use viewfinder_core::domain::snapshot::Snapshot;
use viewfinder_core::error::CoreError;
use viewfinder_infra::webhook::WebhookError;

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub status: &'static str,
}

#[derive(Debug, Error)]
pub enum NotifyApiError {
    #[error("{0}")]
    InvalidSnapshot(#[from] CoreError),
    #[error("webhook url is not configured")]
    NotConfigured,
    #[error("webhook delivery failed: {0}")]
    Delivery(#[from] WebhookError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub async fn notify(
    State(state): State<AppState>,
    Json(snapshot): Json<Snapshot>,
) -> Result<Json<NotifyResponse>, NotifyApiError> {
    snapshot.validate()?;
    let notifier = state
        .notifier
        .as_ref()
        .ok_or(NotifyApiError::NotConfigured)?;
    notifier.send(&snapshot).await?;
    info!(query = %snapshot.query, items = snapshot.items.len(), "snapshot shared to webhook");
    Ok(Json(NotifyResponse { status: "ok" }))
}

impl IntoResponse for NotifyApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            NotifyApiError::InvalidSnapshot(_) | NotifyApiError::NotConfigured => {
                StatusCode::BAD_REQUEST
            }
            NotifyApiError::Delivery(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
