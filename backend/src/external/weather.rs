//! Weather API client for current regional conditions
//!
//! Integrates with the OpenWeatherMap current-weather endpoint, queried by
//! region name.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use shared::WeatherSnapshot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("no region given")]
    NoRegion,

    #[error("weather API key not configured")]
    NoApiKey,

    #[error("weather API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("weather API returned code {0}")]
    Code(String),

    #[error("weather lookup timed out")]
    Timeout,
}

/// Source of current conditions for a region
#[axum::async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, region: &str) -> Result<WeatherSnapshot, WeatherError>;
}

/// OpenWeatherMap client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

/// OpenWeatherMap current weather response, reduced to the fields we use
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    /// Integer on success, sometimes a string on errors
    cod: serde_json::Value,
    main: Option<OwmMain>,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl OwmCurrentResponse {
    fn is_ok(&self) -> bool {
        match &self.cod {
            serde_json::Value::Number(n) => n.as_u64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        }
    }

    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        if !self.is_ok() {
            return Err(WeatherError::Code(self.cod.to_string()));
        }
        let main = self
            .main
            .ok_or_else(|| WeatherError::Code("missing main block".to_string()))?;

        // Last hour, else last three hours, else dry
        let rainfall = self
            .rain
            .and_then(|r| r.one_hour.or(r.three_hour))
            .unwrap_or(0.0);

        Ok(WeatherSnapshot::from_api(main.temp, main.humidity, rainfall))
    }
}

impl OpenWeatherClient {
    /// Create a new client with a per-request timeout
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[axum::async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, region: &str) -> Result<WeatherSnapshot, WeatherError> {
        let region = region.trim();
        if region.is_empty() {
            return Err(WeatherError::NoRegion);
        }
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NoApiKey)?;

        let url = format!("{}/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", region), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WeatherError::Timeout
                } else {
                    WeatherError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status { status, body });
        }

        let data: OwmCurrentResponse = response.json().await?;
        data.into_snapshot()
    }
}
