// Computer catalog - record-management web service
// Entry point and server setup

use clap::Parser;
use computer_catalog::{app, config::ServerConfig, routes};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "computer_catalog=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    tracing::info!("Starting computer catalog");

    let state = app::setup(&config.store_config()).await?;
    let router = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    tracing::info!("Listening on {}", config.listen);

    axum::serve(listener, router).await?;

    Ok(())
}
