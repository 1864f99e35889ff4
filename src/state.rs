use std::{str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{auth::services::JwtKeys, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub jwt: JwtKeys,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("parse DATABASE_URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let jwt = JwtKeys::from(&config.jwt);
        Self { db, config, jwt }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }

    /// Isolated state over a private in-memory database with the schema applied.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        use crate::config::JwtConfig;

        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("in-memory url")
            .foreign_keys(true);
        // one long-lived connection, otherwise each connection sees its own empty database
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<std::time::Duration>)
            .max_lifetime(None::<std::time::Duration>)
            .connect_with(options)
            .await
            .expect("in-memory pool");

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
        });

        let state = Self::from_parts(db, config);
        state.migrate().await.expect("migrations apply");
        state
    }
}
