//! Relay Gateway - REST facade over the task RPC and user SOAP services
//!
//! This is the main entry point for the gateway service. Configuration comes
//! from environment variables; see [`GatewayConfig::from_env`].

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_clients::{build_http_client, HttpTaskRpc, TaskClient, UserClient};
use relay_gateway::{create_router, GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Relay Gateway");

    let config = GatewayConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        task_service_url = %config.task_service_url,
        user_service_url = %config.user_service_url,
        public_base_url = ?config.public_base_url,
        backend_timeout_seconds = config.backend_timeout_seconds,
        "Gateway configuration loaded"
    );

    // One pooled client shared by both adapters
    let http = build_http_client(config.backend_timeout())?;

    let rpc = Arc::new(HttpTaskRpc::with_client(
        http.clone(),
        &config.task_service_url,
    ));
    let tasks = TaskClient::new(rpc, config.backend_timeout());
    let users = UserClient::new(http, &config.user_service_url, config.backend_timeout());

    let listen_addr = config.listen_addr.clone();
    let app = create_router(GatewayState::new(tasks, users, config));

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
