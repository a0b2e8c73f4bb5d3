//! Yield advisory report models

use serde::{Deserialize, Serialize};

/// Overall crop status derived from the predicted yield
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CropStatus {
    /// Prediction above 80
    Excellent,
    /// Prediction above 50, up to and including 80
    Moderate,
    /// Everything else, including NaN
    Poor,
}

impl CropStatus {
    /// Classify a predicted yield. Depends on nothing but the prediction.
    pub fn classify(predicted_yield: f64) -> Self {
        if predicted_yield > 80.0 {
            CropStatus::Excellent
        } else if predicted_yield > 50.0 {
            CropStatus::Moderate
        } else {
            CropStatus::Poor
        }
    }
}

impl std::fmt::Display for CropStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropStatus::Excellent => write!(f, "Excellent"),
            CropStatus::Moderate => write!(f, "Moderate"),
            CropStatus::Poor => write!(f, "Poor"),
        }
    }
}

/// Output of the yield advisory rules
#[derive(Debug, Clone, PartialEq)]
pub struct YieldAdvice {
    pub messages: Vec<String>,
    pub status: CropStatus,
}

/// Weather block of the yield report
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub description: String,
}

/// Final payload of a yield prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisoryReport {
    pub crop_name: String,
    pub location: String,
    pub area: f64,
    pub weather: WeatherReport,
    pub predicted_yield_kgha: f64,
    pub total_production_tonnes: f64,
    pub crop_status: CropStatus,
    pub recommendations: Vec<String>,
    pub sowing_date: String,
}
