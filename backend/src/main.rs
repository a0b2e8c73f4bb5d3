//! Crop Advisory - Backend Server

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crop_advisory::{
    create_app,
    external::{GbdtYieldModel, OpenWeatherClient, ResizingImageProcessor},
    services::{build_normalizer, InMemoryIdentityProvider},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_advisory=debug,crop_advisory_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Crop Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // The model is required, refuse to start without it
    let estimator = GbdtYieldModel::load(&config.model.path)
        .with_context(|| format!("failed to load yield model from {}", config.model.path))?;
    let normalizer = build_normalizer(&config.model, &estimator)?;

    if config.weather.api_key.is_none() {
        tracing::warn!("No weather API key configured, lookups will use default values");
    }
    let weather = OpenWeatherClient::new(
        config.weather.api_endpoint.clone(),
        config.weather.api_key.clone(),
        Duration::from_secs(config.weather.timeout_secs),
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        estimator: Arc::new(estimator),
        normalizer: Arc::new(normalizer),
        weather: Arc::new(weather),
        images: Arc::new(ResizingImageProcessor::default()),
        identity: Arc::new(InMemoryIdentityProvider::new(&config.jwt)),
        rng_seed: None,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server host {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
