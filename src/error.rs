use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::error::AuthError;

/// Errors returned by route handlers. The message is what the client sees.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    /// Missing or owned by another user.
    #[error("Application not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::EmailTaken => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::EmailAlreadyRegistered => Self::EmailTaken,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::NotAuthenticated => Self::NotAuthenticated,
            AuthError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            error!(error = ?e, "request failed");
        }
        let status = self.status();
        let mut res = (status, Json(json!({ "detail": self.to_string() }))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_statuses() {
        assert_eq!(
            AppError::from(AuthError::EmailAlreadyRegistered).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::NotAuthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn internal_error_hides_cause() {
        let err = AppError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(err.to_string(), "Internal server error");
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_carries_bearer_challenge() {
        let res = AppError::NotAuthenticated.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }
}
