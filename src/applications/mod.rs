mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub use repo_types::JobApplication;

pub fn router() -> Router<AppState> {
    handlers::application_routes()
}
