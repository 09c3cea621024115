use serde::Deserialize;
use tracing::warn;

/// Placeholder used when `OPENWEATHER_API_KEY` is unset. Development only.
pub const DEV_WEATHER_API_KEY: &str = "dev-placeholder-key";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    It,
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::It => "it",
            Lang::En => "en",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    pub geo_url: String,
    pub forecast_url: String,
    pub lang: Lang,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    pub session_size: usize,
    /// Accept the client-computed score as the delta instead of grading server-side.
    pub trust_client_score: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub weather: WeatherConfig,
    pub quiz: QuizConfig,
    /// Offset (hours from UTC) used for forecast days and profile timestamps.
    pub display_utc_offset_hours: i8,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let storage = match env_or("STORAGE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => anyhow::bail!("unknown STORAGE_BACKEND {other:?}"),
        };
        let database_url = std::env::var("DATABASE_URL").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORAGE_BACKEND=postgres");
        }

        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: env_or("JWT_ISSUER", "quizweather"),
            audience: env_or("JWT_AUDIENCE", "quizweather-users"),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
            refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
        };

        let api_key = std::env::var("OPENWEATHER_API_KEY").unwrap_or_else(|_| {
            warn!("OPENWEATHER_API_KEY not set; using development placeholder");
            DEV_WEATHER_API_KEY.to_string()
        });
        let lang = match env_or("WEATHER_LANG", "it").to_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::It,
        };
        let weather = WeatherConfig {
            api_key,
            geo_url: env_or(
                "WEATHER_GEO_URL",
                "http://api.openweathermap.org/geo/1.0/direct",
            ),
            forecast_url: env_or(
                "WEATHER_FORECAST_URL",
                "http://api.openweathermap.org/data/2.5/forecast",
            ),
            lang,
            timeout_secs: env_parse("WEATHER_TIMEOUT_SECS", 10),
        };

        let quiz = QuizConfig {
            session_size: env_parse("QUIZ_SESSION_SIZE", 30),
            trust_client_score: env_parse("QUIZ_TRUST_CLIENT_SCORE", true),
        };

        Ok(Self {
            storage,
            database_url,
            jwt,
            weather,
            quiz,
            display_utc_offset_hours: env_parse("DISPLAY_UTC_OFFSET_HOURS", 1),
        })
    }

    pub fn display_offset(&self) -> time::UtcOffset {
        time::UtcOffset::from_hms(self.display_utc_offset_hours, 0, 0)
            .unwrap_or(time::UtcOffset::UTC)
    }
}
