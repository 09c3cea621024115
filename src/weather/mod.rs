use crate::state::AppState;
use axum::Router;

pub mod client;
mod dto;
pub mod forecast;
pub mod handlers;
pub mod services;

pub use services::WeatherGateway;

pub fn router() -> Router<AppState> {
    handlers::weather_routes()
}
