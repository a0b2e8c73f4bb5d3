//! HTTP request handlers

pub mod auth;
pub mod health;
pub mod image;
pub mod prediction;

pub use auth::{login, me, signup};
pub use health::{health_check, root};
pub use image::analyze_crop_image;
pub use prediction::{predict_yield, predict_yield_text};
