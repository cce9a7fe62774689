use studentfeed_config::{AppConfig, CorsConfig, JwtConfig, StorageBackend};
use studentfeed_db::Store;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Store, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }
}

/// Connects the configured storage backend and assembles the state.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    use anyhow::Context;

    let store = match config.server.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on shutdown");
            Store::in_memory()
        }
        StorageBackend::Postgres => {
            let database_url = config
                .server
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;

            let pool = studentfeed_db::init_db_pool(database_url, config.server.max_connections)
                .await
                .context("Failed to connect to database")?;

            if config.server.run_migrations {
                studentfeed_db::run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            Store::postgres(pool)
        }
    };

    Ok(AppState::new(
        store,
        config.jwt.clone(),
        config.cors.clone(),
    ))
}
