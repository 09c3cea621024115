use std::sync::Arc;

use tracing::info;

use crate::activity::repo::{ActivityRepository, InMemoryActivityRepository, PgActivityRepository};
use crate::config::{AppConfig, StorageBackend};
use crate::db;
use crate::quiz::QuizEngine;
use crate::users::repo::{InMemoryUserRepository, PgUserRepository, UserRepository};
use crate::weather::{client::OpenWeatherClient, WeatherGateway};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub activities: Arc<dyn ActivityRepository>,
    pub quiz: Arc<QuizEngine>,
    pub weather: Arc<WeatherGateway>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let (users, activities): (Arc<dyn UserRepository>, Arc<dyn ActivityRepository>) =
            match (config.storage, config.database_url.as_deref()) {
                (StorageBackend::Postgres, Some(url)) => {
                    let pool = db::connect(url).await?;
                    (
                        Arc::new(PgUserRepository::new(pool.clone())),
                        Arc::new(PgActivityRepository::new(pool)),
                    )
                }
                (StorageBackend::Postgres, None) => {
                    anyhow::bail!("DATABASE_URL is required when STORAGE_BACKEND=postgres")
                }
                (StorageBackend::Memory, _) => {
                    info!("using in-memory storage; data is lost on restart");
                    (
                        Arc::new(InMemoryUserRepository::new()),
                        Arc::new(InMemoryActivityRepository::new()),
                    )
                }
            };

        let upstream = Arc::new(OpenWeatherClient::new(config.weather.clone())?);
        let weather = Arc::new(WeatherGateway::new(
            upstream,
            config.weather.lang,
            config.display_offset(),
        ));
        let quiz = Arc::new(QuizEngine::with_builtin_catalog(config.quiz.session_size)?);

        Ok(Self {
            config,
            users,
            activities,
            quiz,
            weather,
        })
    }

    /// In-memory state with a canned weather upstream, for tests.
    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::config::{JwtConfig, Lang, QuizConfig, WeatherConfig};
        use crate::weather::client::fake::StaticUpstream;

        let config = Arc::new(AppConfig {
            storage: StorageBackend::Memory,
            database_url: None,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test".into(),
                audience: "test".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            weather: WeatherConfig {
                api_key: "test".into(),
                geo_url: "http://weather.invalid/geo".into(),
                forecast_url: "http://weather.invalid/forecast".into(),
                lang: Lang::It,
                timeout_secs: 1,
            },
            quiz: QuizConfig {
                session_size: 30,
                trust_client_score: true,
            },
            display_utc_offset_hours: 0,
        });

        let weather = Arc::new(WeatherGateway::new(
            Arc::new(StaticUpstream {
                places: Some(Vec::new()),
                forecast: None,
            }),
            Lang::It,
            config.display_offset(),
        ));

        Self {
            quiz: Arc::new(
                QuizEngine::with_builtin_catalog(config.quiz.session_size)
                    .expect("builtin catalog is valid"),
            ),
            config,
            users: Arc::new(InMemoryUserRepository::new()),
            activities: Arc::new(InMemoryActivityRepository::new()),
            weather,
        }
    }
}
