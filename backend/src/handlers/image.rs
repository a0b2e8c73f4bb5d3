//! Crop image analysis handler

use axum::extract::{Multipart, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::ImageAdvisoryReport;

use crate::error::AppError;
use crate::external::ImageError;
use crate::services::ImageAnalysisService;
use crate::AppState;

/// Name of the multipart field carrying the photo
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub crop_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub result: ImageAdvisoryReport,
}

pub async fn analyze_crop_image(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            upload = Some(field.bytes().await?);
            break;
        }
    }
    let bytes = upload.ok_or(ImageError::Empty)?;

    let result = ImageAnalysisService::new(&state)
        .analyze(bytes.to_vec(), query.crop_type.as_deref())
        .await?;

    Ok(Json(AnalyzeResponse { result }))
}
