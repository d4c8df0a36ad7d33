//! Health check endpoint reporting store readiness.
//! Used by: server.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.backend() {
        Some(backend) => (
            StatusCode::OK,
            Json(HealthResponse { status: "ok".into(), store: backend.into() }),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse { status: "degraded".into(), store: "none".into() }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::PasswordPolicy;
    use crate::state::{build_state_with, build_test_state};

    #[tokio::test]
    async fn ready_store_reports_ok() -> crate::error::Result<()> {
        let (status, Json(body)) = health(State(build_test_state()?)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.store, "sqlite");
        Ok(())
    }

    #[tokio::test]
    async fn missing_store_reports_degraded() {
        let state = build_state_with(None, PasswordPolicy::Plaintext);
        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.store, "none");
    }
}
