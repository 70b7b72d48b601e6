use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use error::AuthError;
pub use extractors::CurrentUser;
pub use jwt::TokenService;
pub use repo::{IdentityStore, SqlIdentityStore, StoreError};
pub use repo_types::Identity;
pub use services::AuthService;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
