use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

/// Routes that require a session.
pub fn router() -> Router<AppState> {
    handlers::profile_routes()
}
