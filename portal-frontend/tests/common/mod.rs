#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use portal_frontend::config::{
    AccessMode, AccessSettings, Environment, FrameworkSettings, ServerSettings, Settings,
};
use portal_frontend::services::{Clock, SystemClock};
use portal_frontend::startup::{build_router, Application};
use portal_frontend::AppState;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Local,
            log_level: "debug".to_string(),
            otlp_endpoint: None,
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
        },
        framework: FrameworkSettings {
            server_external_packages: vec!["icons".to_string()],
            strict_mode: true,
            minify: true,
        },
        access: AccessSettings {
            mode: AccessMode::Session,
            login_path: "/login".to_string(),
        },
    }
}

pub fn router_with(settings: Settings, clock: Arc<dyn Clock>) -> Router {
    build_router(AppState::new(Arc::new(settings), clock))
}

pub fn router() -> Router {
    router_with(test_settings(), Arc::new(SystemClock))
}

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body is not JSON")
}

pub struct FailingClock;

impl Clock for FailingClock {
    fn now(&self) -> anyhow::Result<DateTime<Utc>> {
        Err(anyhow::anyhow!("simulated clock fault"))
    }
}

pub struct PanickingClock;

impl Clock for PanickingClock {
    fn now(&self) -> anyhow::Result<DateTime<Utc>> {
        panic!("simulated panic while building health payload")
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let app = Application::build(test_settings())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}
