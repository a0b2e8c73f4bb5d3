//! External collaborators: yield model, weather API, image decoding

pub mod image_processing;
pub mod weather;
pub mod yield_model;

pub use image_processing::{ImageError, ImageProcessor, Rasters, ResizingImageProcessor};
pub use weather::{OpenWeatherClient, WeatherError, WeatherSource};
pub use yield_model::{EstimatorError, GbdtYieldModel, YieldEstimator};
