//! Library entrypoint for SwipeStock.
//!
//! The binary only wires config, storage and the router together; everything
//! else lives here so integration tests under `tests/` can build an
//! `AppState` over the memory store and drive the routers directly.

pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub mod services;

pub mod controllers;
pub mod routes;

use config::{Settings, StorageBackend};
use store::{MongoStore, Store, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub settings: Settings,
}

impl AppState {
    pub fn new(store: Store, settings: Settings) -> Self {
        Self { store, settings }
    }
}

/// Opens the configured backend, creating Mongo indexes and seeding the
/// stock catalog when enabled.
pub async fn build_store(settings: &Settings) -> Result<Store, StoreError> {
    let store = match settings.storage {
        StorageBackend::Memory => Store::memory(),
        StorageBackend::Mongo => {
            let mongo = MongoStore::connect(&settings.mongodb_uri, &settings.mongodb_db).await?;
            services::db_init::ensure_indexes(mongo.db())
                .await
                .map_err(StoreError::Backend)?;
            Store::Mongo(mongo)
        }
    };

    if settings.seed_catalog {
        let seeded = services::db_init::seed_catalog(&store).await?;
        if seeded > 0 {
            tracing::info!(seeded, "stock catalog seeded");
        }
    }

    Ok(store)
}
