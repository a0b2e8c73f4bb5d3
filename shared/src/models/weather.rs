//! Weather data models

use serde::{Deserialize, Serialize};

/// Temperature used when no weather data can be obtained (°C)
pub const FALLBACK_TEMPERATURE: f64 = 25.0;
/// Humidity used when no weather data can be obtained (%)
pub const FALLBACK_HUMIDITY: f64 = 60.0;
/// Rainfall used when no weather data can be obtained (mm)
pub const FALLBACK_RAINFALL: f64 = 500.0;

/// Where a weather snapshot came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherOrigin {
    /// All three values came with the request
    Provided,
    /// Looked up from the weather API
    WeatherApi,
    /// Weather API unavailable, fixed defaults used
    Fallback,
}

impl WeatherOrigin {
    /// Human-readable description echoed in the yield report
    pub fn description(&self) -> &'static str {
        match self {
            WeatherOrigin::Provided => "Provided with request",
            WeatherOrigin::WeatherApi => "Data from API",
            WeatherOrigin::Fallback => "Default values (weather service unavailable)",
        }
    }
}

/// Climate values used for one advisory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub origin: WeatherOrigin,
}

impl WeatherSnapshot {
    pub fn provided(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
            origin: WeatherOrigin::Provided,
        }
    }

    pub fn from_api(temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            rainfall,
            origin: WeatherOrigin::WeatherApi,
        }
    }

    /// The fixed 25 °C / 60 % / 500 mm triple
    pub fn fallback() -> Self {
        Self {
            temperature: FALLBACK_TEMPERATURE,
            humidity: FALLBACK_HUMIDITY,
            rainfall: FALLBACK_RAINFALL,
            origin: WeatherOrigin::Fallback,
        }
    }

    /// Let values supplied with the request win over looked-up ones
    pub fn overridden_by(
        self,
        temperature: Option<f64>,
        humidity: Option<f64>,
        rainfall: Option<f64>,
    ) -> Self {
        Self {
            temperature: temperature.unwrap_or(self.temperature),
            humidity: humidity.unwrap_or(self.humidity),
            rainfall: rainfall.unwrap_or(self.rainfall),
            origin: self.origin,
        }
    }
}
