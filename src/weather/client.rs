use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::dto::{ForecastResponse, GeoPlace};
use crate::config::WeatherConfig;

/// The third-party geocoding + forecast service.
#[async_trait]
pub trait WeatherUpstream: Send + Sync {
    async fn geocode(&self, query: &str, limit: u8) -> anyhow::Result<Vec<GeoPlace>>;
    async fn forecast(&self, lat: f64, lon: f64) -> anyhow::Result<ForecastResponse>;
}

/// OpenWeatherMap over HTTP, API key in the query string.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    cfg: WeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(cfg: WeatherConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("build weather http client")?;
        Ok(Self { http, cfg })
    }
}

#[async_trait]
impl WeatherUpstream for OpenWeatherClient {
    async fn geocode(&self, query: &str, limit: u8) -> anyhow::Result<Vec<GeoPlace>> {
        let limit = limit.to_string();
        let places = self
            .http
            .get(&self.cfg.geo_url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.cfg.api_key.as_str()),
            ])
            .send()
            .await
            .context("geocoding request")?
            .error_for_status()
            .context("geocoding status")?
            .json::<Vec<GeoPlace>>()
            .await
            .context("decode geocoding response")?;
        debug!(query, matches = places.len(), "geocoded");
        Ok(places)
    }

    async fn forecast(&self, lat: f64, lon: f64) -> anyhow::Result<ForecastResponse> {
        let (lat, lon) = (lat.to_string(), lon.to_string());
        let forecast = self
            .http
            .get(&self.cfg.forecast_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.cfg.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.cfg.lang.code()),
            ])
            .send()
            .await
            .context("forecast request")?
            .error_for_status()
            .context("forecast status")?
            .json::<ForecastResponse>()
            .await
            .context("decode forecast response")?;
        debug!(blocks = forecast.list.len(), "forecast fetched");
        Ok(forecast)
    }
}
