//! Agronomic input models

use serde::{Deserialize, Serialize};

use super::weather::WeatherSnapshot;

/// One yield prediction request.
///
/// Field names on the wire match the columns the yield model was trained on,
/// which is also what the web client sends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgronomicInput {
    #[serde(rename = "Crop")]
    pub crop: String,
    #[serde(rename = "State")]
    pub region: String,
    #[serde(rename = "Year")]
    pub year: i32,
    /// Soil nitrogen, kg/ha
    #[serde(rename = "N")]
    pub nitrogen: f64,
    /// Soil phosphorus, kg/ha
    #[serde(rename = "P")]
    pub phosphorus: f64,
    /// Soil potassium, kg/ha
    #[serde(rename = "K")]
    pub potassium: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub soil_type: String,
    /// Rainfall in mm. Looked up by region when absent.
    #[serde(rename = "Rainfall", default, skip_serializing_if = "Option::is_none")]
    pub rainfall: Option<f64>,
    /// Air temperature in °C. Looked up by region when absent.
    #[serde(rename = "Temp", default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Relative humidity in %. Looked up by region when absent.
    #[serde(rename = "Humidity", default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(rename = "Fertilizer_Type")]
    pub fertilizer_type: String,
    #[serde(rename = "Fertilizer_Amount")]
    pub fertilizer_amount: f64,
    #[serde(rename = "Pesticide_Amount")]
    pub pesticide_amount: f64,
    /// Echoed back untouched, never interpreted
    pub sowing_date: String,
    /// Cultivated area
    pub area: f64,
}

impl AgronomicInput {
    /// Climate supplied with the request, if all three values are present
    pub fn supplied_climate(&self) -> Option<WeatherSnapshot> {
        match (self.temperature, self.humidity, self.rainfall) {
            (Some(temperature), Some(humidity), Some(rainfall)) => {
                Some(WeatherSnapshot::provided(temperature, humidity, rainfall))
            }
            _ => None,
        }
    }

    /// True when at least one climate field has to come from elsewhere
    pub fn needs_weather_lookup(&self) -> bool {
        self.supplied_climate().is_none()
    }

    /// Copy of this input with the climate fields taken from `weather`
    pub fn with_weather(&self, weather: &WeatherSnapshot) -> Self {
        Self {
            temperature: Some(weather.temperature),
            humidity: Some(weather.humidity),
            rainfall: Some(weather.rainfall),
            ..self.clone()
        }
    }
}

/// Ordered numeric feature vector handed to the yield estimator
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFeatureVector {
    values: Vec<f64>,
}

impl ModelFeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Scalar output of the yield estimator, in kg per unit area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub kg_per_area: f64,
}

impl YieldPrediction {
    pub fn new(kg_per_area: f64) -> Self {
        Self { kg_per_area }
    }

    /// Total production over `area`, in tonnes
    pub fn total_production_tonnes(&self, area: f64) -> f64 {
        self.kg_per_area * area / 1000.0
    }
}
