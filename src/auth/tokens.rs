use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// Claims shared by both token kinds. The kind is established by the signing
/// secret: access and refresh tokens are signed with distinct secrets, so a
/// refresh token can never pass access-token verification or vice versa.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Access + refresh token pair returned by register and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing secret is not configured")]
    MissingSecret,
    #[error("Token generation failed: {0}")]
    Generation(String),
    #[error("Invalid or expired token")]
    Invalid,
}

pub fn issue_access_token(security: &SecurityConfig, user_id: Uuid) -> Result<String, TokenError> {
    issue(
        &security.access_token_secret,
        user_id,
        Duration::minutes(security.access_token_ttl_minutes),
    )
}

pub fn issue_refresh_token(security: &SecurityConfig, user_id: Uuid) -> Result<String, TokenError> {
    issue(
        &security.refresh_token_secret,
        user_id,
        Duration::days(security.refresh_token_ttl_days),
    )
}

pub fn issue_token_pair(security: &SecurityConfig, user_id: Uuid) -> Result<TokenPair, TokenError> {
    Ok(TokenPair {
        access_token: issue_access_token(security, user_id)?,
        refresh_token: issue_refresh_token(security, user_id)?,
    })
}

pub fn verify_access_token(security: &SecurityConfig, token: &str) -> Result<Claims, TokenError> {
    verify(&security.access_token_secret, token)
}

pub fn verify_refresh_token(security: &SecurityConfig, token: &str) -> Result<Claims, TokenError> {
    verify(&security.refresh_token_secret, token)
}

fn issue(secret: &str, user_id: Uuid, ttl: Duration) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let claims = Claims::new(user_id, ttl);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Generation(e.to_string()))
}

fn verify(secret: &str, token: &str) -> Result<Claims, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)
}
