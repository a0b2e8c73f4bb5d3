//! Yield prediction handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use shared::{AdvisoryReport, AgronomicInput};

use crate::error::AppError;
use crate::services::PredictionService;
use crate::AppState;

/// Free-text request in the `key: value, ...` format
#[derive(Debug, Deserialize)]
pub struct TextPredictionRequest {
    pub text: String,
}

/// Yield prediction from a structured record
pub async fn predict_yield(
    State(state): State<AppState>,
    body: Result<Json<AgronomicInput>, JsonRejection>,
) -> Result<Json<AdvisoryReport>, AppError> {
    let Json(input) = body?;
    let report = PredictionService::new(&state).predict(input).await?;
    Ok(Json(report))
}

/// Yield prediction from the web client's text format
pub async fn predict_yield_text(
    State(state): State<AppState>,
    body: Result<Json<TextPredictionRequest>, JsonRejection>,
) -> Result<Json<AdvisoryReport>, AppError> {
    let Json(body) = body?;
    let input = shared::parse_yield_text(&body.text)?;
    let report = PredictionService::new(&state).predict(input).await?;
    Ok(Json(report))
}
