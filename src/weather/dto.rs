use serde::{Deserialize, Serialize};

// --- upstream payloads ---

/// One geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPlace {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastBlock>,
}

/// A 3-hour forecast data point.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastBlock {
    pub dt: i64,
    pub main: BlockMain,
    #[serde(default)]
    pub weather: Vec<BlockWeather>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockMain {
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockWeather {
    pub description: String,
}

// --- our API ---

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySuggestion {
    pub name: String,
    pub display: String,
    pub country: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    pub date: String,
    pub weather: String,
    pub day_temp: i64,
    pub night_temp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityForecast {
    pub city: String,
    pub forecast: Vec<DayForecast>,
}
