use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::http::middleware::app_token;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub modules: HealthModules,
}

#[derive(Debug, Serialize)]
pub struct HealthModules {
    pub search: ModuleStatus,
    pub webhook: ModuleStatus,
    pub archive: ModuleStatus,
    pub auth: AuthStatus,
}

#[derive(Debug, Serialize)]
pub struct ModuleStatus {
    pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub token_required: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        modules: HealthModules {
            search: ModuleStatus {
                configured: state.youtube.is_some(),
            },
            webhook: ModuleStatus {
                configured: state.notifier.is_some(),
            },
            archive: ModuleStatus { configured: true },
            auth: AuthStatus {
                token_required: app_token::is_enabled(state.config.app_token.as_deref()),
            },
        },
    })
}
