//! google-image-bot service entry point

use anyhow::Result;
use google_image_bot::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting google-image-bot v{}", google_image_bot::VERSION);

    // Load configuration; a missing API key stops start-up here
    let settings = config::load()?;
    info!("Using homeserver {}", settings.matrix.homeserver_url);

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!(
        "HTTP client initialized (search timeout {:?}, upload timeout {:?})",
        client.search_timeout(),
        client.upload_timeout()
    );

    // Create application state
    let state = AppState::new(settings.clone(), client)?;
    info!("Registered commands: {}", state.registry.names().join(", "));

    let app = create_router(state);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    info!("Listening for commands on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
