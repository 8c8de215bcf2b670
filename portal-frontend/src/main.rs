use dotenvy::dotenv;
use portal_frontend::config::get_configuration;
use portal_frontend::services::init_metrics;
use portal_frontend::startup::Application;
use service_core::observability::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "portal-frontend",
        &configuration.server.log_level,
        configuration.server.otlp_endpoint.as_deref(),
    )?;

    init_metrics();

    let application = Application::build(configuration).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    info!("Starting portal-frontend on port {}", application.port());
    application.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    info!("portal-frontend stopped");
    Ok(())
}
