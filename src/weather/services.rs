use std::sync::Arc;

use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{info, warn};
use uuid::Uuid;

use super::client::WeatherUpstream;
use super::dto::{CityForecast, CitySuggestion};
use super::forecast::{summarize_days, to_suggestion};
use crate::activity::{repo::ActivityRepository, services::record_weather};
use crate::config::Lang;
use crate::error::{AppError, AppResult};
use crate::text::title_case;

pub const MIN_CITY_QUERY_LEN: usize = 2;
pub const MAX_CITY_SUGGESTIONS: u8 = 5;

pub struct WeatherGateway {
    upstream: Arc<dyn WeatherUpstream>,
    lang: Lang,
    offset: UtcOffset,
}

impl WeatherGateway {
    pub fn new(upstream: Arc<dyn WeatherUpstream>, lang: Lang, offset: UtcOffset) -> Self {
        Self {
            upstream,
            lang,
            offset,
        }
    }

    /// Never fails: short queries and upstream errors yield an empty list.
    pub async fn suggest_cities(&self, query: &str) -> Vec<CitySuggestion> {
        let query = query.trim();
        if query.chars().count() < MIN_CITY_QUERY_LEN {
            return Vec::new();
        }
        match self.upstream.geocode(query, MAX_CITY_SUGGESTIONS).await {
            Ok(places) => places.into_iter().map(to_suggestion).collect(),
            Err(e) => {
                warn!(error = %e, query, "city suggestions unavailable");
                Vec::new()
            }
        }
    }

    pub async fn forecast(&self, city: &str) -> AppResult<CityForecast> {
        let today = OffsetDateTime::now_utc().to_offset(self.offset).date();
        self.forecast_on(city, today).await
    }

    pub async fn forecast_on(&self, city: &str, today: Date) -> AppResult<CityForecast> {
        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::Validation("city not specified".into()));
        }

        let place = self
            .upstream
            .geocode(city, 1)
            .await
            .map_err(|e| AppError::Upstream(format!("{e:#}")))?
            .into_iter()
            .next()
            .ok_or(AppError::CityNotFound)?;

        let response = self
            .upstream
            .forecast(place.lat, place.lon)
            .await
            .map_err(|e| AppError::Upstream(format!("{e:#}")))?;

        Ok(CityForecast {
            city: title_case(city),
            forecast: summarize_days(&response.list, today, self.offset, self.lang),
        })
    }
}

/// Forecast for `city`, logging a `weather` activity only when it succeeds.
pub async fn lookup_forecast(
    gateway: &WeatherGateway,
    activities: &dyn ActivityRepository,
    user_id: Uuid,
    city: &str,
) -> AppResult<CityForecast> {
    let forecast = gateway.forecast(city).await?;
    record_weather(activities, user_id, &forecast.city).await?;
    info!(%user_id, city = %forecast.city, days = forecast.forecast.len(), "forecast served");
    Ok(forecast)
}
