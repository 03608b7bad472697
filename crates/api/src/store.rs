//! PostgreSQL-backed [`CommandeStore`] for the order engine.

use restau_core::commande::{CommandeStore, NewCommande};
use restau_core::snapshot::{CatalogMenu, CatalogProduct};
use restau_core::types::DbId;
use restau_db::models::commande::CommandeWithLines;
use restau_db::repositories::{CommandeRepo, MenuRepo, ProductRepo};
use restau_db::DbPool;

use crate::error::AppError;

/// Adapts the order, menu and product repositories to [`CommandeStore`].
#[derive(Clone)]
pub struct PgCommandeStore {
    pool: DbPool,
}

impl PgCommandeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CommandeStore for PgCommandeStore {
    type Record = CommandeWithLines;
    type Error = AppError;

    async fn find_menus(&self, ids: &[DbId]) -> Result<Vec<CatalogMenu>, AppError> {
        let rows = MenuRepo::find_by_ids(&self.pool, ids).await?;
        Ok(rows.into_iter().map(CatalogMenu::from).collect())
    }

    async fn find_products(&self, ids: &[DbId]) -> Result<Vec<CatalogProduct>, AppError> {
        let rows = ProductRepo::find_by_ids(&self.pool, ids).await?;
        rows.into_iter()
            .map(|row| CatalogProduct::try_from(row).map_err(AppError::from))
            .collect()
    }

    async fn insert(&self, commande: NewCommande) -> Result<CommandeWithLines, AppError> {
        Ok(CommandeRepo::create(&self.pool, &commande).await?)
    }

    async fn find(&self, id: DbId) -> Result<Option<CommandeWithLines>, AppError> {
        Ok(CommandeRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list(&self) -> Result<Vec<CommandeWithLines>, AppError> {
        Ok(CommandeRepo::list(&self.pool).await?)
    }

    async fn replace(
        &self,
        id: DbId,
        commande: NewCommande,
    ) -> Result<Option<CommandeWithLines>, AppError> {
        Ok(CommandeRepo::replace(&self.pool, id, &commande).await?)
    }

    async fn soft_delete(&self, id: DbId) -> Result<bool, AppError> {
        Ok(CommandeRepo::soft_delete(&self.pool, id).await?)
    }
}
