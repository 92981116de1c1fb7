use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::{
    config::StoreSettings,
    records::{MemoryRecordStore, PgRecordStore, RecordStore},
};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
}

impl AppState {
    pub async fn new(settings: &StoreSettings) -> Result<Self> {
        let store: Arc<dyn RecordStore> = match settings {
            StoreSettings::Postgres {
                connect_options,
                max_connections,
            } => {
                let pool = PgPoolOptions::new()
                    .max_connections(*max_connections)
                    .connect_with(connect_options.clone())
                    .await
                    .context("failed to connect to Postgres")?;

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("failed to run database migrations")?;

                Arc::new(PgRecordStore::new(pool))
            }
            StoreSettings::Memory => Arc::new(MemoryRecordStore::new()),
        };

        info!(backend = settings.backend(), "record store ready");
        Ok(Self::with_store(store))
    }

    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub async fn close(&self) {
        self.store.close().await;
        info!("record store closed");
    }
}
