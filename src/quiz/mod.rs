use crate::state::AppState;
use axum::Router;

pub mod catalog;
mod dto;
pub mod engine;
pub mod handlers;
pub mod services;

pub use engine::QuizEngine;

pub fn router() -> Router<AppState> {
    handlers::quiz_routes()
}
