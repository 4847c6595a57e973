use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trivia_api::{config::Config, create_router, services::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trivia_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting trivia API");

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        "Configuration loaded for environment: {:?}, storage: {:?}",
        std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string()),
        config.storage_backend
    );

    let bind_address = config.bind_address.clone();
    let app_state = Arc::new(
        AppState::new(config)
            .await
            .context("Failed to initialize application state")?,
    );

    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
