use crate::services::clock::Clock;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub const HEALTHY: &str = "healthy";
pub const HEALTHY_MESSAGE: &str = "API is working correctly";
pub const FAILURE_MESSAGE: &str = "Health check failed";

/// Body of a successful `GET /api/health`. Built fresh for every request.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    /// RFC 3339, millisecond precision, UTC (`2024-01-01T00:00:00.000Z`).
    pub timestamp: String,
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("health check failed: clock unavailable: {0}")]
    Clock(#[source] anyhow::Error),

    #[error("health check failed: could not encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("health check failed: panicked: {0}")]
    Panicked(String),
}

impl HealthStatus {
    pub fn capture(clock: &dyn Clock) -> Result<Self, HealthError> {
        let now = clock.now().map_err(HealthError::Clock)?;

        Ok(Self {
            status: HEALTHY,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            message: HEALTHY_MESSAGE,
        })
    }
}

impl IntoResponse for HealthError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Health check failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": FAILURE_MESSAGE })),
        )
            .into_response()
    }
}
