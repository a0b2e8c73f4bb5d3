//! Business logic services for the Crop Advisory service

pub mod auth;
pub mod codebook;
pub mod image_analysis;
pub mod prediction;

pub use auth::{Identity, IdentityProvider, InMemoryIdentityProvider};
pub use codebook::build_normalizer;
pub use image_analysis::ImageAnalysisService;
pub use prediction::PredictionService;
