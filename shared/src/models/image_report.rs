//! Crop image analysis models

use serde::{Deserialize, Serialize};

use crate::types::ratio_percent;

/// Fractions of the resized raster falling into each colour class
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ColorRatios {
    pub green: f64,
    pub yellow: f64,
    pub brown: f64,
    pub gray: f64,
}

impl ColorRatios {
    pub fn new(green: f64, yellow: f64, brown: f64, gray: f64) -> Self {
        Self {
            green,
            yellow,
            brown,
            gray,
        }
    }

    /// Unrounded health score (green ratio × 100)
    pub fn health_score(&self) -> f64 {
        self.green * 100.0
    }

    pub fn leaf_conditions(&self) -> LeafConditions {
        LeafConditions {
            healthy_green_percent: ratio_percent(self.green),
            yellow_leaves_percent: ratio_percent(self.yellow),
            brown_spots_percent: ratio_percent(self.brown),
            dry_gray_percent: ratio_percent(self.gray),
        }
    }
}

/// Leaf-condition percentages, rounded to 2 decimal places
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeafConditions {
    pub healthy_green_percent: f64,
    pub yellow_leaves_percent: f64,
    pub brown_spots_percent: f64,
    pub dry_gray_percent: f64,
}

/// Diagnosis and recommendations for one photograph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageAdvisoryReport {
    pub crop_type: String,
    pub health_score_percent: f64,
    pub leaf_conditions: LeafConditions,
    pub diagnosis: Vec<String>,
    pub recommendations: Vec<String>,
}
