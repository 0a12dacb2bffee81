use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::tokens::{
    issue_access_token, issue_token_pair, verify_refresh_token, TokenError, TokenPair,
};
use crate::config::SecurityConfig;
use crate::database::models::{NewUser, User};
use crate::database::store::{StoreError, UserStore};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User already exists")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid refresh token")]
    InvalidRefreshToken,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Credential validation and token issuance over the user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    security: SecurityConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, security: SecurityConfig) -> Self {
        Self { users, security }
    }

    /// Create a user with a hashed password and issue its first token pair.
    /// Inputs arrive shape-validated from the API boundary.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(TokenPair, User), AuthError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_password(password, self.security.bcrypt_cost)?;
        let user = self
            .users
            .insert(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Store(other),
            })?;

        tracing::info!(user_id = %user.id, "registered new user");

        let tokens = issue_token_pair(&self.security, user.id)?;
        Ok((tokens, user))
    }

    /// Validate credentials and issue a token pair. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(TokenPair, User), AuthError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = issue_token_pair(&self.security, user.id)?;
        Ok((tokens, user))
    }

    /// Exchange a refresh token for a new access token. Every verification
    /// failure (malformed, expired, forged, or the user no longer exists)
    /// reports the same generic error.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = verify_refresh_token(&self.security, refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        issue_access_token(&self.security, user.id).map_err(AuthError::from)
    }

    /// Look up the profile behind an authenticated request.
    pub async fn profile(&self, user_id: Uuid) -> Result<Option<User>, AuthError> {
        Ok(self.users.find_by_id(user_id).await?)
    }
}
