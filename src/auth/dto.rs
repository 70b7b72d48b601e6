use serde::{Deserialize, Serialize};

use crate::auth::{repo_types::Identity, services::is_valid_email};
use crate::error::AppError;

/// Request body for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Trims the email and rejects malformed input.
    pub fn validate(mut self) -> Result<Self, AppError> {
        self.email = self.email.trim().to_string();
        if !is_valid_email(&self.email) {
            return Err(AppError::validation("Invalid email"));
        }
        if self.password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }
        Ok(self)
    }
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
}

impl From<Identity> for PublicUser {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
        }
    }
}
