use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::auth::{
    password::CredentialHasher,
    repo::{PgUserStore, UserStore},
};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub hasher: CredentialHasher,
}

impl AppState {
    /// Connects to Postgres, applies pending migrations and builds the
    /// shared handler state. An unreachable database is a startup error.
    pub async fn init(config: &AppConfig) -> anyhow::Result<Self> {
        let hasher =
            CredentialHasher::new(&config.hash).context("invalid password hash configuration")?;

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        info!("connected to PostgreSQL");

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            warn!(error = %e, "migration failed; continuing");
        }

        Ok(Self::from_parts(Arc::new(PgUserStore::new(db)), hasher))
    }

    pub fn from_parts(users: Arc<dyn UserStore>, hasher: CredentialHasher) -> Self {
        Self { users, hasher }
    }
}
