//! Identity provider: registration, login, and token verification
//!
//! Accounts live in memory for the life of the process.

use std::collections::HashMap;

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::{LoginRequest, SignupRequest, TokenResponse};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Authenticated identity attached to a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // email
    pub exp: i64,
    pub iat: i64,
}

/// Credentials in, opaque token out; token in, identity out
#[axum::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn register(&self, request: SignupRequest) -> AppResult<Identity>;

    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse>;

    async fn verify_token(&self, token: &str) -> AppResult<Identity>;
}

#[derive(Debug, Clone)]
struct UserRecord {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
}

impl UserRecord {
    fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Non-persistent user store keyed by email
pub struct InMemoryIdentityProvider {
    users: RwLock<HashMap<String, UserRecord>>,
    jwt_secret: String,
    access_token_expiry: i64,
    hash_cost: u32,
}

impl InMemoryIdentityProvider {
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_hash_cost(config, DEFAULT_COST)
    }

    /// Lower bcrypt cost, for tests
    pub fn with_hash_cost(config: &JwtConfig, hash_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            jwt_secret: config.secret.clone(),
            access_token_expiry: config.access_token_expiry,
            hash_cost,
        }
    }

    fn issue_token(&self, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    fn decode_claims(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!("Token rejected: {}", e);
            AppError::InvalidToken
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[axum::async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn register(&self, request: SignupRequest) -> AppResult<Identity> {
        shared::validate_signup(&request)?;

        let email = normalize_email(&request.email);
        if self.users.read().await.contains_key(&email) {
            return Err(AppError::EmailTaken);
        }

        let password = request.password;
        let cost = self.hash_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let record = UserRecord {
            id: Uuid::new_v4(),
            username: request.username.trim().to_string(),
            email: email.clone(),
            password_hash,
        };

        // Re-check under the write lock, a concurrent signup may have won
        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(AppError::EmailTaken);
        }
        let identity = record.identity();
        users.insert(email, record);

        tracing::info!(user_id = %identity.user_id, "User registered");
        Ok(identity)
    }

    async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        shared::validate_login(&request)?;

        let email = normalize_email(&request.email);
        let record = self
            .users
            .read()
            .await
            .get(&email)
            .cloned()
            .ok_or(AppError::InvalidCredentials)?;

        let password = request.password;
        let stored = record.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify(password, &stored))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(&record.email)?;
        tracing::info!(user_id = %record.id, "User logged in");
        Ok(TokenResponse::bearer(token))
    }

    async fn verify_token(&self, token: &str) -> AppResult<Identity> {
        let claims = self.decode_claims(token)?;

        self.users
            .read()
            .await
            .get(&claims.sub)
            .map(UserRecord::identity)
            .ok_or(AppError::InvalidToken)
    }
}
