use crate::models::{HealthError, HealthStatus};
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::any::Any;

/// `GET /api/health`
///
/// Any fault while building the payload becomes a 500 with
/// `{"error":"Health check failed"}`.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match render(&state) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

fn render(state: &AppState) -> Result<Vec<u8>, HealthError> {
    let status = HealthStatus::capture(state.clock.as_ref())?;
    Ok(serde_json::to_vec(&status)?)
}

/// Panic handler for the health route's `CatchPanicLayer`.
pub fn health_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    HealthError::Panicked(detail).into_response()
}
