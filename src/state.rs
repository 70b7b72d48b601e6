use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{AuthService, IdentityStore, SqlIdentityStore, TokenService};
use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub auth: AuthService,
}

impl AppState {
    /// Reads config from the environment, opens the database and migrates it.
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        db::migrate(&db).await?;
        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let identities = Arc::new(SqlIdentityStore::new(db.clone())) as Arc<dyn IdentityStore>;
        let tokens = TokenService::new(&config.jwt);
        Self {
            db,
            config,
            auth: AuthService::new(identities, tokens),
        }
    }
}
