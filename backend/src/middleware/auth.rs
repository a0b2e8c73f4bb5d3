//! Authentication middleware
//!
//! Validates the bearer token and attaches the caller's identity to the
//! request.

use axum::{
    extract::{Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::error::AppError;
use crate::services::Identity;
use crate::AppState;

/// Reject requests without a valid bearer token
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;

    let identity = state.identity.verify_token(bearer.token()).await?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Extractor for the authenticated caller.
/// Only valid on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Identity);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::InvalidToken)
    }
}
