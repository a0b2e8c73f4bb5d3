//! Image advisory rules
//!
//! Nine independent stress categories are checked against the leaf colour
//! ratios. Any subset may trigger; reports list them in evaluation order.

use rand::Rng;

use super::messages::{self, MessagePool};
use super::report::assemble_image_report;
use crate::models::{ColorRatios, ImageAdvisoryReport};

/// Diagnoses (and as many recommendations) drawn per triggered category
pub const MESSAGES_PER_CATEGORY: usize = 2;

/// Crop type assumed when the caller does not name one
pub const DEFAULT_CROP_TYPE: &str = "Wheat";

/// Stress categories in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StressCategory {
    NitrogenDeficiency,
    DiseaseOrPest,
    DroughtStress,
    Healthy,
    SevereFungalDamage,
    NutrientDeficiency,
    WaterStress,
    FungalNutrientStress,
    VeryPoorHealth,
}

impl StressCategory {
    pub const ALL: [StressCategory; 9] = [
        StressCategory::NitrogenDeficiency,
        StressCategory::DiseaseOrPest,
        StressCategory::DroughtStress,
        StressCategory::Healthy,
        StressCategory::SevereFungalDamage,
        StressCategory::NutrientDeficiency,
        StressCategory::WaterStress,
        StressCategory::FungalNutrientStress,
        StressCategory::VeryPoorHealth,
    ];

    pub fn is_triggered(&self, r: &ColorRatios) -> bool {
        match self {
            StressCategory::NitrogenDeficiency => r.yellow > 0.05,
            StressCategory::DiseaseOrPest => r.brown > 0.02,
            StressCategory::DroughtStress => r.gray > 0.05,
            StressCategory::Healthy => {
                r.green > 0.8 && r.yellow < 0.05 && r.brown < 0.02 && r.gray < 0.05
            }
            StressCategory::SevereFungalDamage => r.green < 0.7 && r.brown > 0.1,
            StressCategory::NutrientDeficiency => r.yellow > 0.1 && r.green < 0.6,
            StressCategory::WaterStress => r.yellow > 0.08 && r.brown < 0.02 && r.green > 0.6,
            StressCategory::FungalNutrientStress => r.yellow > 0.07 && r.brown > 0.07,
            // Inclusive: a half-green canopy already counts as very poor
            StressCategory::VeryPoorHealth => r.green <= 0.5,
        }
    }

    pub fn diagnosis_pool(&self) -> MessagePool {
        match self {
            StressCategory::NitrogenDeficiency => messages::NITROGEN_DEFICIENCY_DIAGNOSIS,
            StressCategory::DiseaseOrPest => messages::DISEASE_PEST_DIAGNOSIS,
            StressCategory::DroughtStress => messages::DROUGHT_DIAGNOSIS,
            StressCategory::Healthy => messages::HEALTHY_DIAGNOSIS,
            StressCategory::SevereFungalDamage => messages::SEVERE_FUNGAL_DIAGNOSIS,
            StressCategory::NutrientDeficiency => messages::NUTRIENT_DEFICIENCY_DIAGNOSIS,
            StressCategory::WaterStress => messages::WATER_STRESS_DIAGNOSIS,
            StressCategory::FungalNutrientStress => messages::FUNGAL_NUTRIENT_DIAGNOSIS,
            StressCategory::VeryPoorHealth => messages::VERY_POOR_HEALTH_DIAGNOSIS,
        }
    }

    pub fn recommendation_pool(&self) -> MessagePool {
        match self {
            StressCategory::NitrogenDeficiency => messages::NITROGEN_DEFICIENCY_RECOMMENDATIONS,
            StressCategory::DiseaseOrPest => messages::DISEASE_PEST_RECOMMENDATIONS,
            StressCategory::DroughtStress => messages::DROUGHT_RECOMMENDATIONS,
            StressCategory::Healthy => messages::HEALTHY_RECOMMENDATIONS,
            StressCategory::SevereFungalDamage => messages::SEVERE_FUNGAL_RECOMMENDATIONS,
            StressCategory::NutrientDeficiency => messages::NUTRIENT_DEFICIENCY_RECOMMENDATIONS,
            StressCategory::WaterStress => messages::WATER_STRESS_RECOMMENDATIONS,
            StressCategory::FungalNutrientStress => messages::FUNGAL_NUTRIENT_RECOMMENDATIONS,
            StressCategory::VeryPoorHealth => messages::VERY_POOR_HEALTH_RECOMMENDATIONS,
        }
    }

    /// Category whose diagnosis pool contains `message`
    pub fn from_diagnosis(message: &str) -> Option<StressCategory> {
        StressCategory::ALL
            .iter()
            .copied()
            .find(|c| c.diagnosis_pool().contains(&message))
    }
}

/// Categories triggered by `ratios`, in evaluation order
pub fn triggered_categories(ratios: &ColorRatios) -> Vec<StressCategory> {
    StressCategory::ALL
        .iter()
        .copied()
        .filter(|c| c.is_triggered(ratios))
        .collect()
}

/// Build the full image advisory report
pub fn assess<R: Rng + ?Sized>(
    ratios: &ColorRatios,
    crop_type: &str,
    rng: &mut R,
) -> ImageAdvisoryReport {
    let mut diagnosis = Vec::new();
    let mut recommendations = Vec::new();

    for category in triggered_categories(ratios) {
        diagnosis.extend(
            messages::pick_distinct(category.diagnosis_pool(), MESSAGES_PER_CATEGORY, rng)
                .into_iter()
                .map(String::from),
        );
        recommendations.extend(
            messages::pick_distinct(category.recommendation_pool(), MESSAGES_PER_CATEGORY, rng)
                .into_iter()
                .map(String::from),
        );
    }

    assemble_image_report(crop_type, ratios, diagnosis, recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn mixed_stress_triggers_exact_set() {
        let ratios = ColorRatios::new(0.5, 0.06, 0.03, 0.0);
        assert_eq!(
            triggered_categories(&ratios),
            vec![
                StressCategory::NitrogenDeficiency,
                StressCategory::DiseaseOrPest,
                StressCategory::VeryPoorHealth,
            ]
        );
    }

    #[test]
    fn lush_canopy_is_only_healthy() {
        let ratios = ColorRatios::new(0.92, 0.01, 0.005, 0.01);
        assert_eq!(triggered_categories(&ratios), vec![StressCategory::Healthy]);
    }

    #[test]
    fn dry_canopy_triggers_drought() {
        let ratios = ColorRatios::new(0.85, 0.0, 0.0, 0.12);
        assert_eq!(triggered_categories(&ratios), vec![StressCategory::DroughtStress]);
    }

    #[test]
    fn heavy_browning_triggers_fungal_categories() {
        let ratios = ColorRatios::new(0.4, 0.12, 0.15, 0.0);
        assert_eq!(
            triggered_categories(&ratios),
            vec![
                StressCategory::NitrogenDeficiency,
                StressCategory::DiseaseOrPest,
                StressCategory::SevereFungalDamage,
                StressCategory::NutrientDeficiency,
                StressCategory::FungalNutrientStress,
                StressCategory::VeryPoorHealth,
            ]
        );
    }

    #[test]
    fn yellowing_without_spots_is_water_stress() {
        let ratios = ColorRatios::new(0.7, 0.09, 0.0, 0.0);
        assert_eq!(
            triggered_categories(&ratios),
            vec![StressCategory::NitrogenDeficiency, StressCategory::WaterStress]
        );
    }

    #[test]
    fn middling_canopy_triggers_nothing() {
        let ratios = ColorRatios::new(0.75, 0.03, 0.01, 0.02);
        assert!(triggered_categories(&ratios).is_empty());
        let report = assess(&ratios, "Rice", &mut StdRng::seed_from_u64(0));
        assert!(report.diagnosis.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn report_draws_two_messages_per_category() {
        let ratios = ColorRatios::new(0.5, 0.06, 0.03, 0.0);
        let report = assess(&ratios, DEFAULT_CROP_TYPE, &mut StdRng::seed_from_u64(5));
        assert_eq!(report.diagnosis.len(), 6);
        assert_eq!(report.recommendations.len(), 6);

        let categories: Vec<_> = report
            .diagnosis
            .iter()
            .map(|d| StressCategory::from_diagnosis(d).unwrap())
            .collect();
        assert_eq!(
            categories,
            vec![
                StressCategory::NitrogenDeficiency,
                StressCategory::NitrogenDeficiency,
                StressCategory::DiseaseOrPest,
                StressCategory::DiseaseOrPest,
                StressCategory::VeryPoorHealth,
                StressCategory::VeryPoorHealth,
            ]
        );
        assert_ne!(report.diagnosis[0], report.diagnosis[1]);
    }

    #[test]
    fn report_echoes_scores() {
        let ratios = ColorRatios::new(0.823456, 0.0, 0.0, 0.0);
        let report = assess(&ratios, "Maize", &mut StdRng::seed_from_u64(1));
        assert_eq!(report.crop_type, "Maize");
        assert_eq!(report.health_score_percent, 82.35);
        assert_eq!(report.leaf_conditions.healthy_green_percent, 82.35);
    }

    #[test]
    fn half_green_canopy_wording_matches_inclusive_bound() {
        let ratios = ColorRatios::new(0.5, 0.0, 0.0, 0.0);
        assert_eq!(triggered_categories(&ratios), vec![StressCategory::VeryPoorHealth]);

        for seed in 0..20 {
            let report = assess(&ratios, "Maize", &mut StdRng::seed_from_u64(seed));
            assert!(report.diagnosis.iter().all(|d| !d.contains("Less than half")));
        }
        assert!(StressCategory::VeryPoorHealth
            .diagnosis_pool()
            .iter()
            .all(|m| !m.to_lowercase().contains("less than half")));
    }

    #[test]
    fn diagnosis_pools_are_disjoint() {
        for a in StressCategory::ALL {
            for b in StressCategory::ALL {
                if a != b {
                    assert!(a.diagnosis_pool().iter().all(|m| !b.diagnosis_pool().contains(m)));
                }
            }
        }
    }
}
