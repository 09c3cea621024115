use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod guard;
pub mod handlers;
pub mod jwt;
pub mod password;

/// Routes reachable without a session.
pub fn public_router() -> Router<AppState> {
    handlers::auth_routes()
}

pub fn router() -> Router<AppState> {
    handlers::me_routes()
}
