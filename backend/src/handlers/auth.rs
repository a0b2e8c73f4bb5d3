//! Authentication handlers

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Serialize;
use shared::{LoginRequest, SignupRequest, TokenResponse};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::services::Identity;
use crate::AppState;

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
}

/// Signup endpoint handler
pub async fn signup(
    State(state): State<AppState>,
    body: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let Json(body) = body?;
    let identity = state.identity.register(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user_id: identity.user_id.to_string(),
        }),
    ))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(body) = body?;
    let token = state.identity.login(body).await?;
    Ok(Json(token))
}

/// Current user endpoint handler
pub async fn me(CurrentUser(identity): CurrentUser) -> Json<Identity> {
    Json(identity)
}
