//! HTTP application wiring (axum router + service wiring).
//!
//! Folder layout:
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and the validation boundary
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use catalogd_catalog::{InMemoryProductStore, ProductCatalog, ProductStore};
use catalogd_infra::PostgresProductStore;

use crate::config::Config;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handler state.
pub struct AppState {
    pub catalog: ProductCatalog<Arc<dyn ProductStore>>,
}

/// Build the storage adapter selected by configuration.
///
/// With `DATABASE_URL` set this connects the pool up front, so a
/// misconfigured database fails the process at startup rather than on
/// the first request.
pub async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ProductStore>> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresProductStore::connect(url).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory product store");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and
/// the black-box tests).
pub fn build_app(store: Arc<dyn ProductStore>) -> Router {
    let state = Arc::new(AppState {
        catalog: ProductCatalog::new(store),
    });

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/products", routes::products::router())
        .layer(Extension(state))
}
