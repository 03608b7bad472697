use std::sync::Arc;

use restau_core::commande::CommandeEngine;

use crate::config::ServerConfig;
use crate::store::PgCommandeStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and the config is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: restau_db::DbPool,
    /// Server configuration (JWT settings, pricing policy).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Order engine bound to this state's pool and pricing policy.
    pub fn commandes(&self) -> CommandeEngine<PgCommandeStore> {
        CommandeEngine::new(
            PgCommandeStore::new(self.pool.clone()),
            self.config.order_pricing,
        )
    }
}
