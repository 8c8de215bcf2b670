//! Access control for rendered pages.
//!
//! A protected page is routed through [`protected_page`], which asks the
//! configured [`AccessPolicy`] whether the current session may see it.
//! Allowed responses are passed through [`wrap`] untouched.

use crate::config::{AccessMode, AccessSettings};
use crate::models::user::ACCESS_TOKEN_KEY;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Send the caller elsewhere (usually the login page).
    Redirect(String),
    Deny(StatusCode),
}

#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn check(&self, session: &Session) -> AccessDecision;
}

/// Requires an access token in the session.
#[derive(Debug, Clone)]
pub struct SessionPolicy {
    login_path: String,
}

impl SessionPolicy {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }
}

#[async_trait]
impl AccessPolicy for SessionPolicy {
    async fn check(&self, session: &Session) -> AccessDecision {
        let access_token: Option<String> = match session.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read access token from session");
                None
            }
        };

        match access_token {
            Some(token) if !token.is_empty() => AccessDecision::Allow,
            _ => AccessDecision::Redirect(self.login_path.clone()),
        }
    }
}

/// Lets every request through. Only built for `access.mode = bypass`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl AccessPolicy for AllowAll {
    async fn check(&self, _session: &Session) -> AccessDecision {
        AccessDecision::Allow
    }
}

pub fn policy_for(settings: &AccessSettings) -> Arc<dyn AccessPolicy> {
    match settings.mode {
        AccessMode::Session => Arc::new(SessionPolicy::new(settings.login_path.clone())),
        AccessMode::Bypass => {
            tracing::warn!("Page access checks are bypassed: every page renders for every caller");
            Arc::new(AllowAll)
        }
    }
}

/// Router state for [`protected_page`].
#[derive(Clone)]
pub struct PageGate {
    pub policy: Arc<dyn AccessPolicy>,
}

impl PageGate {
    pub fn new(policy: Arc<dyn AccessPolicy>) -> Self {
        Self { policy }
    }
}

/// Hands rendered page content back unchanged.
pub fn wrap<T>(content: T) -> T {
    content
}

pub async fn protected_page(
    State(gate): State<PageGate>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    match gate.policy.check(&session).await {
        AccessDecision::Allow => wrap(next.run(request).await),
        AccessDecision::Redirect(location) => {
            tracing::debug!(path = %request.uri().path(), %location, "Redirecting unauthenticated page request");
            Redirect::to(&location).into_response()
        }
        AccessDecision::Deny(status) => {
            tracing::debug!(path = %request.uri().path(), %status, "Page request denied");
            status.into_response()
        }
    }
}
