use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::{Future, IntoFuture};
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Settings;
use crate::handlers::{
    app::{index, login_page},
    health::{health_check, health_panic_response},
    metrics::metrics,
    user::dashboard_handler,
};
use crate::middleware::protected_page;
use crate::services::{Clock, SystemClock};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let settings = state.settings.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(settings.server.environment.is_production())
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    let static_dir = Path::new(&settings.server.static_dir);

    let mut router = Router::new()
        .route("/", get(index))
        .route("/login", get(login_page))
        .route(
            "/dashboard",
            get(dashboard_handler)
                .route_layer(from_fn_with_state(state.gate.clone(), protected_page)),
        )
        .route(
            "/api/health",
            get(health_check).layer(CatchPanicLayer::custom(health_panic_response)),
        )
        .route("/metrics", get(metrics))
        .nest_service("/static", ServeDir::new(static_dir));

    if settings.framework.minify {
        router = router.layer(CompressionLayer::new());
    }

    // Added after compression so external packages are served verbatim
    for package in &settings.framework.server_external_packages {
        router = router.nest_service(
            &format!("/vendor/{}", package),
            ServeDir::new(static_dir.join("vendor").join(package)),
        );
    }

    if settings.framework.strict_mode {
        router = router.layer(from_fn(security_headers_middleware));
    }

    router
        .layer(session_layer)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
}

impl Application {
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        Self::build_with_clock(settings, Arc::new(SystemClock)).await
    }

    pub async fn build_with_clock(
        settings: Settings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        settings.validate()?;

        tracing::info!(
            environment = ?settings.server.environment,
            strict_mode = settings.framework.strict_mode,
            minify = settings.framework.minify,
            external_packages = ?settings.framework.server_external_packages,
            access_mode = ?settings.access.mode,
            "Loaded portal-frontend settings"
        );

        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState::new(Arc::new(settings), clock);
        let app = build_router(state);

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
