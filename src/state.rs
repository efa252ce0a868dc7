use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::address::client::{DaDataClient, GeocodeClient};
use crate::address::service::AddressService;
use crate::auth::repo::{PgUserStore, UserStore};
use crate::auth::service::UserService;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub address: AddressService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
        }

        let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(db));
        let geocoder: Arc<dyn GeocodeClient> = Arc::new(DaDataClient::new(&config.dadata));
        Ok(Self::from_parts(users, geocoder, config))
    }

    /// Wire the services from already-built collaborators. Tests use this to
    /// swap in the in-memory store and a stub geocoder.
    pub fn from_parts(
        users: Arc<dyn UserStore>,
        geocoder: Arc<dyn GeocodeClient>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            users: UserService::new(users),
            address: AddressService::new(geocoder),
            config,
        }
    }
}
