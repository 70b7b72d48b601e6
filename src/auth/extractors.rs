use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::auth::repo_types::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// The user behind the request's bearer token.
pub struct CurrentUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            warn!("missing or malformed Authorization header");
            AppError::NotAuthenticated
        })?;

        let identity = state.auth.authenticate(token).await?;
        Ok(CurrentUser(identity))
    }
}

// Expect "Bearer <token>", scheme case-insensitive.
fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
