//! Fixed paraphrase pools for advisory messages

use rand::seq::SliceRandom;
use rand::Rng;

/// A fixed set of interchangeable phrasings for one finding
pub type MessagePool = &'static [&'static str];

/// Replaced with the fertilizer type named in the request
pub const FERTILIZER_PLACEHOLDER: &str = "{fertilizer}";

/// Draw one phrasing uniformly at random
pub fn pick<R: Rng + ?Sized>(pool: MessagePool, rng: &mut R) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Draw `count` distinct phrasings (fewer if the pool is smaller)
pub fn pick_distinct<R: Rng + ?Sized>(
    pool: MessagePool,
    count: usize,
    rng: &mut R,
) -> Vec<&'static str> {
    pool.choose_multiple(rng, count).copied().collect()
}

// ----------------------------------------------------------------------------
// Yield advisory pools
// ----------------------------------------------------------------------------

pub const NITROGEN_SEVERE: MessagePool = &[
    "🌱 Nitrogen very low: Apply 25–30 kg/ha urea immediately.",
    "🌱 Severe nitrogen shortage: Top-dress with 25–30 kg/ha urea without delay.",
    "🌱 Nitrogen is critically low: An immediate urea application of 25–30 kg/ha is advised.",
];

pub const NITROGEN_MILD: MessagePool = &[
    "🌱 Nitrogen low: Apply nitrogen-rich fertilizer like urea.",
    "🌱 Nitrogen is slightly below target: Add a nitrogen source such as urea.",
    "🌱 Mild nitrogen deficit: A light dose of urea or ammonium sulphate will help.",
];

pub const NITROGEN_SUFFICIENT: MessagePool = &[
    "🌱 Nitrogen levels are sufficient.",
    "🌱 Soil nitrogen is adequate for this crop.",
    "🌱 No extra nitrogen needed at the moment.",
];

pub const PHOSPHORUS_SEVERE: MessagePool = &[
    "🌿 Phosphorus very low: Apply 30–40 kg/ha DAP.",
    "🌿 Severe phosphorus shortage: Band-place 30–40 kg/ha DAP near the root zone.",
    "🌿 Phosphorus is critically low: Use 30–40 kg/ha DAP or single super phosphate.",
];

pub const PHOSPHORUS_MILD: MessagePool = &[
    "🌿 Phosphorus low: Consider additional phosphorus fertilizer.",
    "🌿 Phosphorus is slightly below target: A small phosphate application is recommended.",
    "🌿 Mild phosphorus deficit: Add DAP or rock phosphate at the next feeding.",
];

pub const PHOSPHORUS_SUFFICIENT: MessagePool = &[
    "🌿 Phosphorus levels are sufficient.",
    "🌿 Soil phosphorus is adequate for this crop.",
    "🌿 No extra phosphate needed at the moment.",
];

pub const POTASSIUM_SEVERE: MessagePool = &[
    "🪴 Potassium very low: Apply 30–40 kg/ha MOP.",
    "🪴 Severe potassium shortage: Apply 30–40 kg/ha muriate of potash right away.",
    "🪴 Potassium is critically low: Broadcast 30–40 kg/ha MOP before the next irrigation.",
];

pub const POTASSIUM_MILD: MessagePool = &[
    "🪴 Potassium low: Consider additional potassium fertilizer.",
    "🪴 Potassium is slightly below target: A light potash dose is recommended.",
    "🪴 Mild potassium deficit: Add MOP or sulphate of potash at the next feeding.",
];

pub const POTASSIUM_SUFFICIENT: MessagePool = &[
    "🪴 Potassium levels are sufficient.",
    "🪴 Soil potassium is adequate for this crop.",
    "🪴 No extra potash needed at the moment.",
];

pub const SOIL_ACIDIC: MessagePool = &[
    "🧪 Soil is acidic. Apply lime to raise pH and improve nutrient uptake.",
    "🧪 Acidic soil detected: Agricultural lime will lift the pH and free up nutrients.",
    "🧪 pH is below the ideal range: Liming is recommended before the next sowing.",
];

pub const SOIL_ALKALINE: MessagePool = &[
    "🧪 Soil is alkaline. Add organic matter or gypsum to improve pH.",
    "🧪 Alkaline soil detected: Gypsum and compost will help bring the pH down.",
    "🧪 pH is above the ideal range: Work in organic matter or gypsum.",
];

pub const SOIL_OPTIMAL: MessagePool = &[
    "🧪 Soil pH is optimal.",
    "🧪 Soil pH is within the ideal range for nutrient uptake.",
    "🧪 No pH correction needed.",
];

pub const RAINFALL_LOW: MessagePool = &[
    "💧 Low rainfall detected. Irrigation is necessary.",
    "💧 Rainfall is insufficient: Plan supplementary irrigation.",
    "💧 Dry conditions expected: Schedule regular irrigation to avoid moisture stress.",
];

pub const RAINFALL_HIGH: MessagePool = &[
    "💧 High rainfall. Ensure proper drainage to avoid waterlogging.",
    "💧 Heavy rainfall expected: Clear field drains to prevent waterlogging.",
    "💧 Excess rainfall: Use raised beds or drainage channels to protect roots.",
];

pub const RAINFALL_ADEQUATE: MessagePool = &[
    "💧 Rainfall is adequate.",
    "💧 Rainfall is within the normal range for this crop.",
    "💧 No additional irrigation needed based on rainfall.",
];

pub const TEMPERATURE_COLD: MessagePool = &[
    "❄️ Low temperature: Protect crops from frost if applicable.",
    "❄️ Cold conditions: Use mulch or covers to guard against frost damage.",
    "❄️ Temperature is below the optimal range: Watch for frost and delay sensitive operations.",
];

pub const TEMPERATURE_HOT: MessagePool = &[
    "☀️ High temperature: Use mulching/shading or plant heat-tolerant varieties.",
    "☀️ Heat stress risk: Irrigate in the early morning and consider shade nets.",
    "☀️ Temperature is above the optimal range: Mulch to keep the soil cool.",
];

pub const TEMPERATURE_OPTIMAL: MessagePool = &[
    "🌡️ Temperature is within optimal range.",
    "🌡️ Temperatures are favourable for crop growth.",
    "🌡️ No temperature-related action needed.",
];

pub const HUMIDITY_DRY: MessagePool = &[
    "💦 Low humidity: Use drip irrigation or maintain soil moisture.",
    "💦 Dry air: Mulch and drip irrigation will help retain soil moisture.",
    "💦 Humidity is below the ideal range: Keep the soil evenly moist.",
];

pub const HUMIDITY_HUMID: MessagePool = &[
    "💦 High humidity: Monitor for fungal diseases and apply fungicides proactively.",
    "💦 Humid conditions favour fungal disease: Scout regularly and spray preventively.",
    "💦 Humidity is above the ideal range: Improve airflow and watch for mildew and blight.",
];

pub const HUMIDITY_IDEAL: MessagePool = &[
    "💦 Humidity is within ideal range.",
    "💦 Humidity levels are favourable.",
    "💦 No humidity-related action needed.",
];

pub const FERTILIZER_LOW: MessagePool = &[
    "🌾 Fertilizer amount is low. Consider increasing {fertilizer} fertilizer for optimal growth.",
    "🌾 Applied fertilizer is below the recommended dose. Increase {fertilizer} application.",
    "🌾 Low fertilizer use detected: A higher {fertilizer} dose should improve yield.",
];

pub const PESTICIDE_LOW: MessagePool = &[
    "🐛 Pesticide amount is low. Regular pest monitoring is recommended.",
    "🐛 Low pesticide use: Scout the field weekly for pest pressure.",
    "🐛 Pest control is light: Keep an eye out for early signs of infestation.",
];

pub const STATUS_EXCELLENT: MessagePool = &[
    "📊 Overall crop health is excellent. Maintain current practices.",
    "📊 The crop is in excellent condition. Keep following your current plan.",
    "📊 Excellent yield outlook. No major changes needed.",
];

pub const STATUS_MODERATE: MessagePool = &[
    "📊 Overall crop health is moderate. Follow above recommendations for better yield.",
    "📊 The crop is in moderate condition. The advice above can lift your yield.",
    "📊 Moderate yield outlook. Acting on the recommendations above should help.",
];

pub const STATUS_POOR: MessagePool = &[
    "📊 Overall crop health is poor. Immediate action required: optimize nutrients, irrigation, and pest control.",
    "📊 The crop is in poor condition. Act now on nutrients, irrigation and pest control.",
    "📊 Poor yield outlook. Urgent attention to fertilization, water and pests is needed.",
];

// ----------------------------------------------------------------------------
// Image advisory pools
// ----------------------------------------------------------------------------

pub const NITROGEN_DEFICIENCY_DIAGNOSIS: MessagePool = &[
    "Nitrogen deficiency detected (yellow leaves).",
    "Yellowing foliage points to a lack of nitrogen.",
    "Chlorosis visible on leaves, typical of nitrogen shortage.",
    "Pale yellow patches suggest the crop is short of nitrogen.",
];

pub const NITROGEN_DEFICIENCY_RECOMMENDATIONS: MessagePool = &[
    "Apply nitrogen-rich fertilizer.",
    "Top-dress with urea or ammonium nitrate.",
    "Split the nitrogen dose across the growing stages.",
    "Consider a foliar urea spray for a quick correction.",
];

pub const DISEASE_PEST_DIAGNOSIS: MessagePool = &[
    "Possible disease or pest attack (brown/black spots).",
    "Brown lesions on leaves suggest fungal or bacterial infection.",
    "Dark spotting may indicate pest feeding damage.",
    "Leaf spots detected, a sign of early disease pressure.",
];

pub const DISEASE_PEST_RECOMMENDATIONS: MessagePool = &[
    "Inspect crop for pests/diseases and use appropriate treatment.",
    "Remove and destroy badly affected leaves.",
    "Apply a suitable fungicide or insecticide after confirming the cause.",
    "Avoid overhead watering to limit disease spread.",
];

pub const DROUGHT_DIAGNOSIS: MessagePool = &[
    "Dry or grayish patches detected, indicating drought stress.",
    "Dull gray foliage suggests the crop is drying out.",
    "Signs of moisture stress visible on leaves.",
    "Leaf tissue appears dry and desaturated.",
];

pub const DROUGHT_RECOMMENDATIONS: MessagePool = &[
    "Increase irrigation frequency.",
    "Mulch around plants to conserve soil moisture.",
    "Irrigate in the early morning to reduce evaporation losses.",
    "Check the soil moisture at root depth before each watering.",
];

pub const HEALTHY_DIAGNOSIS: MessagePool = &[
    "Crop appears healthy.",
    "Foliage is uniformly green with no visible stress.",
    "No signs of nutrient deficiency or disease.",
    "The canopy looks vigorous and well nourished.",
];

pub const HEALTHY_RECOMMENDATIONS: MessagePool = &[
    "Maintain regular irrigation and monitoring.",
    "Continue the current fertilization schedule.",
    "Keep scouting weekly to catch problems early.",
    "Record this baseline for comparison with future photos.",
];

pub const SEVERE_FUNGAL_DIAGNOSIS: MessagePool = &[
    "Severe fungal damage detected across the canopy.",
    "Extensive browning indicates an advanced fungal infection.",
    "Large necrotic areas suggest blight or rust.",
    "Widespread lesions point to serious fungal disease.",
];

pub const SEVERE_FUNGAL_RECOMMENDATIONS: MessagePool = &[
    "Apply a systemic fungicide immediately.",
    "Consult a local plant pathologist for a treatment plan.",
    "Remove heavily infected plants to protect the rest of the field.",
    "Rotate to a non-host crop next season.",
];

pub const NUTRIENT_DEFICIENCY_DIAGNOSIS: MessagePool = &[
    "Significant nutrient deficiency detected.",
    "Widespread yellowing with low green cover indicates poor nutrition.",
    "The crop is visibly undernourished.",
    "Multiple nutrient shortages are likely.",
];

pub const NUTRIENT_DEFICIENCY_RECOMMENDATIONS: MessagePool = &[
    "Run a soil test to identify the missing nutrients.",
    "Apply a balanced NPK fertilizer.",
    "Add micronutrients such as zinc and iron if the soil test confirms a need.",
    "Incorporate compost or farmyard manure to build soil fertility.",
];

pub const WATER_STRESS_DIAGNOSIS: MessagePool = &[
    "Water stress detected (yellowing without disease spots).",
    "Leaf yellowing pattern suggests irregular watering.",
    "The crop shows signs of moisture imbalance.",
    "Yellowing on otherwise healthy plants points to water stress.",
];

pub const WATER_STRESS_RECOMMENDATIONS: MessagePool = &[
    "Adjust the irrigation schedule to keep soil moisture steady.",
    "Check for waterlogging or drainage problems.",
    "Use drip irrigation for more even water delivery.",
    "Water deeply and less often to encourage root growth.",
];

pub const FUNGAL_NUTRIENT_DIAGNOSIS: MessagePool = &[
    "Combined fungal infection and nutrient stress detected.",
    "Yellowing and brown spots together suggest disease on weakened plants.",
    "Nutrient-stressed plants appear to be succumbing to fungal attack.",
    "Both disease symptoms and nutrient deficiency are visible.",
];

pub const FUNGAL_NUTRIENT_RECOMMENDATIONS: MessagePool = &[
    "Treat with fungicide and correct nutrition at the same time.",
    "Apply a balanced fertilizer once the fungal infection is under control.",
    "Improve field sanitation and plant spacing for better airflow.",
    "Monitor closely over the next two weeks for further spread.",
];

pub const VERY_POOR_HEALTH_DIAGNOSIS: MessagePool = &[
    "Very poor crop health: low green coverage.",
    "Half or less of the canopy is healthy green tissue.",
    "The crop is under severe overall stress.",
    "Crop vigour is very low.",
];

pub const VERY_POOR_HEALTH_RECOMMENDATIONS: MessagePool = &[
    "Seek advice from an agronomist as soon as possible.",
    "Review irrigation, nutrition and pest control together.",
    "Consider replanting badly affected areas.",
    "Take soil and tissue samples for laboratory analysis.",
];
