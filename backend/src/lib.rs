//! Crop Advisory service
//!
//! Yield prediction and leaf-photo health analysis for farmers, each turned
//! into plain-language advice.

use std::sync::Arc;

use axum::Router;
use shared::FeatureNormalizer;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use external::{ImageProcessor, WeatherSource, YieldEstimator};
use services::IdentityProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub estimator: Arc<dyn YieldEstimator>,
    pub normalizer: Arc<FeatureNormalizer>,
    pub weather: Arc<dyn WeatherSource>,
    pub images: Arc<dyn ImageProcessor>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Fixed seed for advisory message selection. `None` seeds from entropy.
    pub rng_seed: Option<u64>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    routes::api_routes(&state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(error::panic_response))
                .layer(cors),
        )
        .with_state(state)
}
