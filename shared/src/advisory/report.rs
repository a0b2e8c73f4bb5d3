//! Report assembly
//!
//! Pure data shaping. Every advisory message produced by the rules ends up in
//! the payload, in the order it was produced.

use crate::models::{
    AdvisoryReport, AgronomicInput, ColorRatios, ImageAdvisoryReport, WeatherReport,
    WeatherSnapshot, YieldAdvice, YieldPrediction,
};
use crate::types::ratio_percent;

pub fn assemble_yield_report(
    input: &AgronomicInput,
    weather: &WeatherSnapshot,
    prediction: YieldPrediction,
    advice: YieldAdvice,
) -> AdvisoryReport {
    AdvisoryReport {
        crop_name: input.crop.clone(),
        location: input.region.clone(),
        area: input.area,
        weather: WeatherReport {
            temperature: weather.temperature,
            humidity: weather.humidity,
            rainfall: weather.rainfall,
            description: weather.origin.description().to_string(),
        },
        predicted_yield_kgha: prediction.kg_per_area,
        total_production_tonnes: prediction.total_production_tonnes(input.area),
        crop_status: advice.status,
        recommendations: advice.messages,
        sowing_date: input.sowing_date.clone(),
    }
}

pub fn assemble_image_report(
    crop_type: &str,
    ratios: &ColorRatios,
    diagnosis: Vec<String>,
    recommendations: Vec<String>,
) -> ImageAdvisoryReport {
    ImageAdvisoryReport {
        crop_type: crop_type.to_string(),
        health_score_percent: ratio_percent(ratios.green),
        leaf_conditions: ratios.leaf_conditions(),
        diagnosis,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::balanced_input;
    use crate::models::CropStatus;

    #[test]
    fn yield_report_echoes_request_and_keeps_messages() {
        let input = balanced_input();
        let advice = YieldAdvice {
            messages: vec!["a".into(), "b".into(), "c".into()],
            status: CropStatus::Moderate,
        };
        let report = assemble_yield_report(
            &input,
            &WeatherSnapshot::fallback(),
            YieldPrediction::new(60.0),
            advice,
        );

        assert_eq!(report.crop_name, "Wheat");
        assert_eq!(report.location, "Punjab");
        assert_eq!(report.sowing_date, "2024-11-05");
        assert_eq!(report.total_production_tonnes, 60.0);
        assert_eq!(report.recommendations, vec!["a", "b", "c"]);
        assert_eq!(report.crop_status, CropStatus::Moderate);
        assert_eq!(report.weather.rainfall, 500.0);
        assert_eq!(
            report.weather.description,
            "Default values (weather service unavailable)"
        );
    }

    #[test]
    fn yield_report_wire_shape() {
        let input = balanced_input();
        let report = assemble_yield_report(
            &input,
            &input.supplied_climate().unwrap(),
            YieldPrediction::new(85.5),
            YieldAdvice {
                messages: vec![],
                status: CropStatus::Excellent,
            },
        );
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "crop_name",
            "location",
            "area",
            "weather",
            "predicted_yield_kgha",
            "total_production_tonnes",
            "crop_status",
            "recommendations",
            "sowing_date",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["weather"]["temperature"], 25.0);
        assert_eq!(json["crop_status"], "Excellent");
    }
}
