//! Edge Wizard server binary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use edge_wizard::adapters::cloudflare::CloudflareControlPlane;
use edge_wizard::adapters::http::{wizard_routes, WizardHandlers};
use edge_wizard::adapters::storage::InMemorySessionStore;
use edge_wizard::application::{DeployWorkerHandler, HandleMessageHandler};
use edge_wizard::config::{AppConfig, ServerConfig};

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.server);

    tracing::info!("Edge Wizard v{} starting", env!("CARGO_PKG_VERSION"));

    let control_plane = CloudflareControlPlane::new(&config.control_plane.api_base_url)
        .context("Failed to create control-plane client")?;
    let deployer = Arc::new(DeployWorkerHandler::new(
        Arc::new(control_plane),
        config.control_plane.worker_name.clone(),
    ));
    let message_handler = Arc::new(HandleMessageHandler::new(
        Arc::new(InMemorySessionStore::new()),
        deployer,
        config.worker.visit_log_url.clone(),
    ));

    let app = wizard_routes(WizardHandlers::new(message_handler));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
