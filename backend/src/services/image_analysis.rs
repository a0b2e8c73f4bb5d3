//! Crop image analysis service

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::ImageAdvisoryReport;

use crate::error::{AppError, AppResult};
use crate::external::{ImageError, ImageProcessor};
use crate::AppState;

#[derive(Clone)]
pub struct ImageAnalysisService {
    processor: Arc<dyn ImageProcessor>,
    timeout: Duration,
    max_upload_bytes: usize,
    rng_seed: Option<u64>,
}

impl ImageAnalysisService {
    pub fn new(state: &AppState) -> Self {
        Self {
            processor: state.images.clone(),
            timeout: Duration::from_secs(state.config.image.timeout_secs),
            max_upload_bytes: state.config.image.max_upload_bytes,
            rng_seed: state.rng_seed,
        }
    }

    /// Decode the upload off the async runtime and classify its colours
    pub async fn analyze(
        &self,
        bytes: Vec<u8>,
        crop_type: Option<&str>,
    ) -> AppResult<ImageAdvisoryReport> {
        if bytes.is_empty() {
            return Err(ImageError::Empty.into());
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(ImageError::TooLarge {
                limit: self.max_upload_bytes,
            }
            .into());
        }

        let processor = self.processor.clone();
        let task = tokio::task::spawn_blocking(move || processor.process(&bytes));

        let rasters = tokio::time::timeout(self.timeout, task)
            .await
            .map_err(|_| ImageError::Timeout)?
            .map_err(|e| AppError::Internal(format!("Image task failed: {}", e)))??;

        let ratios = shared::measure_ratios(&rasters.hsv);
        let crop_type = shared::crop_type_or_default(crop_type);

        tracing::debug!(
            crop_type = %crop_type,
            green = ratios.green,
            yellow = ratios.yellow,
            brown = ratios.brown,
            gray = ratios.gray,
            "Colour ratios measured"
        );

        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(shared::assess(&ratios, &crop_type, &mut rng))
    }
}
