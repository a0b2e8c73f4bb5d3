//! Leaf photo decoding
//!
//! Decodes an upload, resizes it to the fixed analysis size and produces
//! the HSV raster the colour masks run on.

use image::imageops::FilterType;
use shared::{rgb_to_hsv, ANALYSIS_SIZE};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("could not decode image: {0}")]
    Undecodable(String),

    #[error("image is empty")]
    Empty,

    #[error("image processing timed out")]
    Timeout,

    #[error("image exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Pixel rasters of a decoded, resized image, row-major
#[derive(Debug, Clone)]
pub struct Rasters {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<[u8; 3]>,
    pub hsv: Vec<[u8; 3]>,
}

/// Turns uploaded bytes into analysis rasters. CPU-bound, call off the runtime.
pub trait ImageProcessor: Send + Sync {
    fn process(&self, bytes: &[u8]) -> Result<Rasters, ImageError>;
}

/// Resizes every image to a square of `size` pixels with bilinear filtering
#[derive(Debug, Clone)]
pub struct ResizingImageProcessor {
    size: u32,
}

impl ResizingImageProcessor {
    pub fn new(size: u32) -> Self {
        Self { size }
    }
}

impl Default for ResizingImageProcessor {
    fn default() -> Self {
        Self::new(ANALYSIS_SIZE)
    }
}

impl ImageProcessor for ResizingImageProcessor {
    fn process(&self, bytes: &[u8]) -> Result<Rasters, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let decoded =
            image::load_from_memory(bytes).map_err(|e| ImageError::Undecodable(e.to_string()))?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(ImageError::Empty);
        }

        let resized = image::imageops::resize(
            &decoded.to_rgb8(),
            self.size,
            self.size,
            FilterType::Triangle,
        );

        let rgb: Vec<[u8; 3]> = resized.pixels().map(|p| p.0).collect();
        let hsv = rgb.iter().map(|&px| rgb_to_hsv(px)).collect();

        Ok(Rasters {
            width: resized.width(),
            height: resized.height(),
            rgb,
            hsv,
        })
    }
}
