//! Shared fixtures and collaborator doubles for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request};
use crop_advisory::config::{
    Config, ImageConfig, JwtConfig, ModelConfig, ServerConfig, WeatherConfig,
};
use crop_advisory::external::{
    EstimatorError, ResizingImageProcessor, WeatherError, WeatherSource, YieldEstimator,
};
use crop_advisory::services::InMemoryIdentityProvider;
use crop_advisory::AppState;
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use shared::{AgronomicInput, FeatureNormalizer, ModelFeatureVector, WeatherSnapshot, YieldPrediction};

pub const SEED: u64 = 7;

// ============================================================================
// Inputs
// ============================================================================

/// Balanced Punjab wheat field, climate included
pub fn sample_input() -> AgronomicInput {
    AgronomicInput {
        crop: "Wheat".to_string(),
        region: "Punjab".to_string(),
        year: 2024,
        nitrogen: 60.0,
        phosphorus: 30.0,
        potassium: 40.0,
        ph: 6.5,
        soil_type: "Loamy".to_string(),
        rainfall: Some(500.0),
        temperature: Some(25.0),
        humidity: Some(60.0),
        fertilizer_type: "Urea".to_string(),
        fertilizer_amount: 100.0,
        pesticide_amount: 10.0,
        sowing_date: "2024-11-05".to_string(),
        area: 1000.0,
    }
}

/// Same field without any climate values
pub fn input_without_climate() -> AgronomicInput {
    AgronomicInput {
        rainfall: None,
        temperature: None,
        humidity: None,
        ..sample_input()
    }
}

// ============================================================================
// Collaborator doubles
// ============================================================================

/// Returns the same prediction for any vector of the right width
pub struct FixedEstimator {
    pub value: f64,
    pub width: usize,
}

impl YieldEstimator for FixedEstimator {
    fn predict(&self, features: &ModelFeatureVector) -> Result<YieldPrediction, EstimatorError> {
        if features.len() != self.width {
            return Err(EstimatorError::FeatureCount {
                expected: self.width,
                actual: features.len(),
            });
        }
        Ok(YieldPrediction::new(self.value))
    }

    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    fn num_features(&self) -> usize {
        self.width
    }
}

pub struct StaticWeather(pub WeatherSnapshot);

#[axum::async_trait]
impl WeatherSource for StaticWeather {
    async fn current(&self, _region: &str) -> Result<WeatherSnapshot, WeatherError> {
        Ok(self.0)
    }
}

/// Behaves like the API answering with a non-200 status
pub struct FailingWeather;

#[axum::async_trait]
impl WeatherSource for FailingWeather {
    async fn current(&self, _region: &str) -> Result<WeatherSnapshot, WeatherError> {
        Err(WeatherError::Status {
            status: 401,
            body: r#"{"cod":401,"message":"Invalid API key"}"#.to_string(),
        })
    }
}

/// Never answers within the configured timeout
pub struct HangingWeather;

#[axum::async_trait]
impl WeatherSource for HangingWeather {
    async fn current(&self, _region: &str) -> Result<WeatherSnapshot, WeatherError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(WeatherSnapshot::from_api(0.0, 0.0, 0.0))
    }
}

// ============================================================================
// State
// ============================================================================

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        model: ModelConfig {
            path: "unused.json".to_string(),
            codebook_path: None,
            feature_order: None,
        },
        weather: WeatherConfig {
            timeout_secs: 1,
            ..WeatherConfig::default()
        },
        image: ImageConfig::default(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry: 1800,
        },
    }
}

pub fn state_with(prediction: f64, weather: Arc<dyn WeatherSource>) -> AppState {
    let config = test_config();
    AppState {
        identity: Arc::new(InMemoryIdentityProvider::with_hash_cost(&config.jwt, 4)),
        config: Arc::new(config),
        estimator: Arc::new(FixedEstimator {
            value: prediction,
            width: 15,
        }),
        normalizer: Arc::new(FeatureNormalizer::default()),
        weather,
        images: Arc::new(ResizingImageProcessor::default()),
        rng_seed: Some(SEED),
    }
}

pub fn test_state() -> AppState {
    state_with(
        90.0,
        Arc::new(StaticWeather(WeatherSnapshot::from_api(28.0, 55.0, 300.0))),
    )
}

// ============================================================================
// HTTP helpers
// ============================================================================

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub const BOUNDARY: &str = "crop-advisory-test-boundary";

pub fn multipart_request(uri: &str, field: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"leaf.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

/// PNG of a single flat colour
pub fn solid_png(rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(32, 32, Rgb(rgb));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode png");
    buf.into_inner()
}
