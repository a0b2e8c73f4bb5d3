//! Yield advisory rules
//!
//! A fixed sequence of independent threshold checks over the agronomic input
//! and the climate values. Each check lands in exactly one branch; the two
//! amount checks may add nothing. The overall status always comes last.

use rand::Rng;

use super::messages::{self, MessagePool, FERTILIZER_PLACEHOLDER};
use crate::models::{AgronomicInput, CropStatus, WeatherSnapshot, YieldAdvice, YieldPrediction};

pub const NITROGEN_SEVERE_BELOW: f64 = 30.0;
pub const NITROGEN_MILD_BELOW: f64 = 50.0;
pub const PHOSPHORUS_SEVERE_BELOW: f64 = 15.0;
pub const PHOSPHORUS_MILD_BELOW: f64 = 25.0;
pub const POTASSIUM_SEVERE_BELOW: f64 = 20.0;
pub const POTASSIUM_MILD_BELOW: f64 = 35.0;
pub const PH_ACIDIC_BELOW: f64 = 6.0;
pub const PH_ALKALINE_ABOVE: f64 = 7.5;
pub const RAINFALL_LOW_BELOW: f64 = 200.0;
pub const RAINFALL_HIGH_ABOVE: f64 = 800.0;
pub const TEMPERATURE_COLD_BELOW: f64 = 15.0;
pub const TEMPERATURE_HOT_ABOVE: f64 = 35.0;
pub const HUMIDITY_DRY_BELOW: f64 = 50.0;
pub const HUMIDITY_HUMID_ABOVE: f64 = 80.0;
pub const FERTILIZER_LOW_BELOW: f64 = 50.0;
pub const PESTICIDE_LOW_BELOW: f64 = 5.0;

/// Outcome of one yield check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finding {
    NitrogenSevere,
    NitrogenMild,
    NitrogenSufficient,
    PhosphorusSevere,
    PhosphorusMild,
    PhosphorusSufficient,
    PotassiumSevere,
    PotassiumMild,
    PotassiumSufficient,
    SoilAcidic,
    SoilAlkaline,
    SoilOptimal,
    RainfallLow,
    RainfallHigh,
    RainfallAdequate,
    TemperatureCold,
    TemperatureHot,
    TemperatureOptimal,
    HumidityDry,
    HumidityHumid,
    HumidityIdeal,
    FertilizerLow,
    PesticideLow,
    Status(CropStatus),
}

impl Finding {
    /// Phrasings this finding may be rendered with
    pub fn pool(&self) -> MessagePool {
        match self {
            Finding::NitrogenSevere => messages::NITROGEN_SEVERE,
            Finding::NitrogenMild => messages::NITROGEN_MILD,
            Finding::NitrogenSufficient => messages::NITROGEN_SUFFICIENT,
            Finding::PhosphorusSevere => messages::PHOSPHORUS_SEVERE,
            Finding::PhosphorusMild => messages::PHOSPHORUS_MILD,
            Finding::PhosphorusSufficient => messages::PHOSPHORUS_SUFFICIENT,
            Finding::PotassiumSevere => messages::POTASSIUM_SEVERE,
            Finding::PotassiumMild => messages::POTASSIUM_MILD,
            Finding::PotassiumSufficient => messages::POTASSIUM_SUFFICIENT,
            Finding::SoilAcidic => messages::SOIL_ACIDIC,
            Finding::SoilAlkaline => messages::SOIL_ALKALINE,
            Finding::SoilOptimal => messages::SOIL_OPTIMAL,
            Finding::RainfallLow => messages::RAINFALL_LOW,
            Finding::RainfallHigh => messages::RAINFALL_HIGH,
            Finding::RainfallAdequate => messages::RAINFALL_ADEQUATE,
            Finding::TemperatureCold => messages::TEMPERATURE_COLD,
            Finding::TemperatureHot => messages::TEMPERATURE_HOT,
            Finding::TemperatureOptimal => messages::TEMPERATURE_OPTIMAL,
            Finding::HumidityDry => messages::HUMIDITY_DRY,
            Finding::HumidityHumid => messages::HUMIDITY_HUMID,
            Finding::HumidityIdeal => messages::HUMIDITY_IDEAL,
            Finding::FertilizerLow => messages::FERTILIZER_LOW,
            Finding::PesticideLow => messages::PESTICIDE_LOW,
            Finding::Status(CropStatus::Excellent) => messages::STATUS_EXCELLENT,
            Finding::Status(CropStatus::Moderate) => messages::STATUS_MODERATE,
            Finding::Status(CropStatus::Poor) => messages::STATUS_POOR,
        }
    }

    /// Every concrete message this finding can produce for `input`
    pub fn renderings(&self, input: &AgronomicInput) -> Vec<String> {
        self.pool()
            .iter()
            .map(|template| render(template, input))
            .collect()
    }

    /// Whether `message` is one of this finding's phrasings for `input`
    pub fn matches(&self, message: &str, input: &AgronomicInput) -> bool {
        self.pool()
            .iter()
            .any(|template| render(template, input) == message)
    }
}

fn render(template: &str, input: &AgronomicInput) -> String {
    template.replace(FERTILIZER_PLACEHOLDER, &input.fertilizer_type)
}

pub fn nitrogen_finding(n: f64) -> Finding {
    if n < NITROGEN_SEVERE_BELOW {
        Finding::NitrogenSevere
    } else if n < NITROGEN_MILD_BELOW {
        Finding::NitrogenMild
    } else {
        Finding::NitrogenSufficient
    }
}

pub fn phosphorus_finding(p: f64) -> Finding {
    if p < PHOSPHORUS_SEVERE_BELOW {
        Finding::PhosphorusSevere
    } else if p < PHOSPHORUS_MILD_BELOW {
        Finding::PhosphorusMild
    } else {
        Finding::PhosphorusSufficient
    }
}

pub fn potassium_finding(k: f64) -> Finding {
    if k < POTASSIUM_SEVERE_BELOW {
        Finding::PotassiumSevere
    } else if k < POTASSIUM_MILD_BELOW {
        Finding::PotassiumMild
    } else {
        Finding::PotassiumSufficient
    }
}

pub fn ph_finding(ph: f64) -> Finding {
    if ph < PH_ACIDIC_BELOW {
        Finding::SoilAcidic
    } else if ph > PH_ALKALINE_ABOVE {
        Finding::SoilAlkaline
    } else {
        Finding::SoilOptimal
    }
}

pub fn rainfall_finding(rainfall: f64) -> Finding {
    if rainfall < RAINFALL_LOW_BELOW {
        Finding::RainfallLow
    } else if rainfall > RAINFALL_HIGH_ABOVE {
        Finding::RainfallHigh
    } else {
        Finding::RainfallAdequate
    }
}

pub fn temperature_finding(temperature: f64) -> Finding {
    if temperature > TEMPERATURE_HOT_ABOVE {
        Finding::TemperatureHot
    } else if temperature < TEMPERATURE_COLD_BELOW {
        Finding::TemperatureCold
    } else {
        Finding::TemperatureOptimal
    }
}

pub fn humidity_finding(humidity: f64) -> Finding {
    if humidity > HUMIDITY_HUMID_ABOVE {
        Finding::HumidityHumid
    } else if humidity < HUMIDITY_DRY_BELOW {
        Finding::HumidityDry
    } else {
        Finding::HumidityIdeal
    }
}

/// Run every check in order. Deterministic.
pub fn evaluate_yield(
    input: &AgronomicInput,
    prediction: YieldPrediction,
    weather: &WeatherSnapshot,
) -> Vec<Finding> {
    let mut findings = vec![
        nitrogen_finding(input.nitrogen),
        phosphorus_finding(input.phosphorus),
        potassium_finding(input.potassium),
        ph_finding(input.ph),
        rainfall_finding(weather.rainfall),
        temperature_finding(weather.temperature),
        humidity_finding(weather.humidity),
    ];

    if input.fertilizer_amount < FERTILIZER_LOW_BELOW {
        findings.push(Finding::FertilizerLow);
    }
    if input.pesticide_amount < PESTICIDE_LOW_BELOW {
        findings.push(Finding::PesticideLow);
    }

    findings.push(Finding::Status(CropStatus::classify(prediction.kg_per_area)));
    findings
}

/// Evaluate the checks and render one message per finding
pub fn advise<R: Rng + ?Sized>(
    input: &AgronomicInput,
    prediction: YieldPrediction,
    weather: &WeatherSnapshot,
    rng: &mut R,
) -> YieldAdvice {
    let rendered = evaluate_yield(input, prediction, weather)
        .iter()
        .map(|finding| render(messages::pick(finding.pool(), &mut *rng), input))
        .collect();

    YieldAdvice {
        messages: rendered,
        status: CropStatus::classify(prediction.kg_per_area),
    }
}
