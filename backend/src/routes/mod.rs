//! Route definitions for the Crop Advisory service

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Multipart framing allowance on top of the image size limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create API routes
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .route("/signup", post(handlers::signup))
        .route("/login", post(handlers::login))
        // Advisory routes (public)
        .route("/predict_yield", post(handlers::predict_yield))
        .route("/predict_yield/text", post(handlers::predict_yield_text))
        .merge(image_routes(state))
        // Protected routes
        .merge(account_routes(state))
}

/// Image upload routes, with the body limit raised to the configured size
fn image_routes(state: &AppState) -> Router<AppState> {
    let limit = state.config.image.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/analyze_crop_image", post(handlers::analyze_crop_image))
        .layer(DefaultBodyLimit::max(limit))
}

/// Account routes (protected)
fn account_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}
