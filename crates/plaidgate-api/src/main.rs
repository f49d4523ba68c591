//! # plaidgate-api: Binary Entry Point
//!
//! Reads configuration from the environment, builds the Plaid client and
//! serves the gateway. Binds to `PORT` (default 3000).

use plaidgate_api::state::{AppConfig, AppState};
use plaidgate_client::{PlaidClient, PlaidConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {e}");
        e
    })?;

    let plaid_config = PlaidConfig::from_env().map_err(|e| {
        tracing::error!("Plaid configuration error: {e}");
        e
    })?;
    tracing::info!(
        environment = %plaid_config.environment,
        base_url = %plaid_config.base_url,
        timeout_secs = plaid_config.timeout_secs,
        "Plaid client configured"
    );
    let plaid = PlaidClient::new(plaid_config)?;

    let port = config.port;
    if let Some(https_port) = config.https_port {
        tracing::info!("TLS expected on port {https_port} (terminated upstream of this process)");
    }

    let app = plaidgate_api::app(AppState::new(config, plaid));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("plaidgate listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
