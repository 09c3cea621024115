use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CityForecast, CityQuery, CitySuggestion, WeatherQuery},
    services::lookup_forecast,
};
use crate::{auth::guard::AuthUser, error::AppResult, state::AppState};

pub fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/city-suggestions", get(city_suggestions))
        .route("/weather", get(get_weather))
}

#[instrument(skip(state))]
pub async fn city_suggestions(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Query(q): Query<CityQuery>,
) -> Json<Vec<CitySuggestion>> {
    Json(state.weather.suggest_cities(&q.q).await)
}

#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<WeatherQuery>,
) -> AppResult<Json<CityForecast>> {
    let forecast = lookup_forecast(
        &state.weather,
        state.activities.as_ref(),
        user_id,
        &q.city,
    )
    .await?;
    Ok(Json(forecast))
}
