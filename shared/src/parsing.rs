//! Free-text yield request parsing
//!
//! Accepts the `key: value, key: value` form typed into the web client, e.g.
//! `crop: Wheat, state: Punjab, year: 2024, n: 40, ...`.

use thiserror::Error;

use crate::models::AgronomicInput;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Default)]
struct Draft {
    crop: Option<String>,
    region: Option<String>,
    year: Option<i32>,
    nitrogen: Option<f64>,
    phosphorus: Option<f64>,
    potassium: Option<f64>,
    ph: Option<f64>,
    soil_type: Option<String>,
    rainfall: Option<f64>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    fertilizer_type: Option<String>,
    fertilizer_amount: Option<f64>,
    pesticide_amount: Option<f64>,
    sowing_date: Option<String>,
    area: Option<f64>,
}

fn number(field: &'static str, value: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ParseError> {
    value.ok_or(ParseError::MissingField(field))
}

/// Parse a comma-separated `key: value` description of a yield request.
///
/// Keys are case-insensitive and unknown keys are ignored. Climate keys are
/// optional; everything else is required.
pub fn parse_yield_text(text: &str) -> Result<AgronomicInput, ParseError> {
    let mut draft = Draft::default();

    for item in text.split(',') {
        let Some((key, value)) = item.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_lowercase().as_str() {
            "crop" => draft.crop = Some(value.to_string()),
            "state" => draft.region = Some(value.to_string()),
            "year" => {
                draft.year = Some(value.parse::<i32>().map_err(|_| ParseError::InvalidNumber {
                    field: "year",
                    value: value.to_string(),
                })?)
            }
            "n" => draft.nitrogen = Some(number("n", value)?),
            "p" => draft.phosphorus = Some(number("p", value)?),
            "k" => draft.potassium = Some(number("k", value)?),
            "ph" => draft.ph = Some(number("ph", value)?),
            "soil" | "soil_type" => draft.soil_type = Some(value.to_string()),
            "rainfall" => draft.rainfall = Some(number("rainfall", value)?),
            "temp" | "temperature" => draft.temperature = Some(number("temperature", value)?),
            "humidity" => draft.humidity = Some(number("humidity", value)?),
            "fertilizer" | "fertilizer_type" => draft.fertilizer_type = Some(value.to_string()),
            "fertilizer_amount" => {
                draft.fertilizer_amount = Some(number("fertilizer_amount", value)?)
            }
            "pesticide_amount" => draft.pesticide_amount = Some(number("pesticide_amount", value)?),
            "sowing_date" => draft.sowing_date = Some(value.to_string()),
            "area" => draft.area = Some(number("area", value)?),
            _ => {}
        }
    }

    Ok(AgronomicInput {
        crop: required(draft.crop, "crop")?,
        region: required(draft.region, "state")?,
        year: required(draft.year, "year")?,
        nitrogen: required(draft.nitrogen, "n")?,
        phosphorus: required(draft.phosphorus, "p")?,
        potassium: required(draft.potassium, "k")?,
        ph: required(draft.ph, "ph")?,
        soil_type: required(draft.soil_type, "soil_type")?,
        rainfall: draft.rainfall,
        temperature: draft.temperature,
        humidity: draft.humidity,
        fertilizer_type: required(draft.fertilizer_type, "fertilizer")?,
        fertilizer_amount: required(draft.fertilizer_amount, "fertilizer_amount")?,
        pesticide_amount: required(draft.pesticide_amount, "pesticide_amount")?,
        sowing_date: required(draft.sowing_date, "sowing_date")?,
        area: required(draft.area, "area")?,
    })
}
