//! Yield prediction service
//!
//! Resolves climate values, runs the estimator, and turns the prediction
//! into an advisory report.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{AdvisoryReport, AgronomicInput, FeatureNormalizer, WeatherSnapshot};

use crate::error::AppResult;
use crate::external::{WeatherSource, YieldEstimator};
use crate::AppState;

#[derive(Clone)]
pub struct PredictionService {
    estimator: Arc<dyn YieldEstimator>,
    normalizer: Arc<FeatureNormalizer>,
    weather: Arc<dyn WeatherSource>,
    weather_timeout: Duration,
    rng_seed: Option<u64>,
}

impl PredictionService {
    pub fn new(state: &AppState) -> Self {
        Self {
            estimator: state.estimator.clone(),
            normalizer: state.normalizer.clone(),
            weather: state.weather.clone(),
            weather_timeout: Duration::from_secs(state.config.weather.timeout_secs),
            rng_seed: state.rng_seed,
        }
    }

    /// Climate values for `input`.
    ///
    /// A request carrying all three values is used as is. Otherwise the
    /// region is looked up, with any request values winning per field. A
    /// failed lookup uses the fallback triple for the missing fields only.
    pub async fn resolve_weather(&self, input: &AgronomicInput) -> WeatherSnapshot {
        if let Some(supplied) = input.supplied_climate() {
            return supplied;
        }

        let lookup = tokio::time::timeout(self.weather_timeout, self.weather.current(&input.region));
        let base = match lookup.await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                tracing::warn!(region = %input.region, "Weather lookup failed, using defaults: {}", e);
                WeatherSnapshot::fallback()
            }
            Err(_) => {
                tracing::warn!(region = %input.region, "Weather lookup timed out, using defaults");
                WeatherSnapshot::fallback()
            }
        };

        base.overridden_by(input.temperature, input.humidity, input.rainfall)
    }

    pub async fn predict(&self, input: AgronomicInput) -> AppResult<AdvisoryReport> {
        let weather = self.resolve_weather(&input).await;
        let resolved = input.with_weather(&weather);

        let features = self.normalizer.normalize(&resolved);
        let prediction = self.estimator.predict(&features)?;

        tracing::debug!(
            crop = %resolved.crop,
            region = %resolved.region,
            yield_per_area = prediction.kg_per_area,
            "Yield predicted"
        );

        let mut rng = self.rng();
        let advice = shared::advise(&resolved, prediction, &weather, &mut rng);

        Ok(shared::assemble_yield_report(
            &resolved, &weather, prediction, advice,
        ))
    }

    fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
