//! Back office of a nail studio: clients, appointments, service catalog,
//! portfolio and the views derived from them.
//!
//! The `data` feature builds the domain, persistence and service layers; the
//! `server` feature adds the JSON API and the binary.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::{ServerConfig, StorageBackend, StorageConfig};
#[cfg(feature = "server")]
use crate::repository::memory::MemoryRepository;
#[cfg(feature = "server")]
use crate::repository::{DieselRepository, Store};

pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

/// Opens the store selected by the configuration.
#[cfg(feature = "server")]
pub fn build_store(storage: &StorageConfig) -> std::io::Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match storage.backend {
        StorageBackend::Sqlite => {
            let pool = establish_connection_pool(&storage.database_url).map_err(|e| {
                std::io::Error::other(format!("Failed to establish database connection: {e}"))
            })?;
            Arc::new(DieselRepository::new(pool))
        }
        StorageBackend::Memory => Arc::new(MemoryRepository::new()),
        StorageBackend::Json => {
            let repo = MemoryRepository::open(&storage.data_dir).map_err(|e| {
                std::io::Error::other(format!(
                    "Failed to open data directory {}: {e}",
                    storage.data_dir
                ))
            })?;
            Arc::new(repo)
        }
    };

    log::info!("Using {:?} storage backend", storage.backend);
    Ok(store)
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let store = build_store(&server_config.storage)?;
    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::from(store.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
