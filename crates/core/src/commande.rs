//! Order (commande) engine: creation, role-gated update, read and delete.
//!
//! The engine owns the rules; persistence goes through [`CommandeStore`].
//! Every write hands the store a complete [`NewCommande`] (status, price and
//! all line snapshots) so the store can apply it as one atomic unit.

use std::future::Future;

use serde::Deserialize;

use crate::error::CoreError;
use crate::order_status::{ensure_status_allowed, OrderStatus};
use crate::pricing::PricingPolicy;
use crate::roles::Role;
use crate::snapshot::{
    distinct_ids, snapshot_menus, snapshot_products, CatalogMenu, CatalogProduct, OrderSnapshots,
};
use crate::types::{DbId, Money};

/// Entity label used in not-found errors.
pub const ENTITY_COMMANDE: &str = "Commande";

/// Request to create an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandeDraft {
    #[serde(default)]
    pub menus: Vec<DbId>,
    #[serde(default)]
    pub products: Vec<DbId>,
    pub price: Option<Money>,
}

/// Request to rewrite an existing order: new status, price and full line set.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandeChange {
    pub status: OrderStatus,
    #[serde(default)]
    pub menus: Vec<DbId>,
    #[serde(default)]
    pub products: Vec<DbId>,
    pub price: Option<Money>,
}

/// Everything the store writes for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommande {
    pub status: OrderStatus,
    pub price: Money,
    pub lines: OrderSnapshots,
}

/// Persistence boundary used by [`CommandeEngine`].
///
/// `insert` and `replace` must be atomic: either the order row and all of its
/// lines are written, or nothing is. `replace` deletes every existing line of
/// the order before inserting the new ones.
pub trait CommandeStore: Send + Sync {
    /// An order as returned to callers, with both line collections loaded.
    type Record: Send;
    type Error: From<CoreError> + Send;

    /// Non-deleted menus whose ID is in `ids`, in a single batched lookup.
    fn find_menus(
        &self,
        ids: &[DbId],
    ) -> impl Future<Output = Result<Vec<CatalogMenu>, Self::Error>> + Send;

    /// Non-deleted products whose ID is in `ids`, in a single batched lookup.
    fn find_products(
        &self,
        ids: &[DbId],
    ) -> impl Future<Output = Result<Vec<CatalogProduct>, Self::Error>> + Send;

    fn insert(
        &self,
        commande: NewCommande,
    ) -> impl Future<Output = Result<Self::Record, Self::Error>> + Send;

    fn find(&self, id: DbId)
        -> impl Future<Output = Result<Option<Self::Record>, Self::Error>> + Send;

    fn list(&self) -> impl Future<Output = Result<Vec<Self::Record>, Self::Error>> + Send;

    /// Overwrite status, price and lines. Returns `None` if the order is gone.
    fn replace(
        &self,
        id: DbId,
        commande: NewCommande,
    ) -> impl Future<Output = Result<Option<Self::Record>, Self::Error>> + Send;

    /// Mark the order deleted. Returns `true` if a live row was marked.
    fn soft_delete(&self, id: DbId) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Order lifecycle operations over a [`CommandeStore`].
#[derive(Debug, Clone)]
pub struct CommandeEngine<S> {
    store: S,
    pricing: PricingPolicy,
}

impl<S: CommandeStore> CommandeEngine<S> {
    pub fn new(store: S, pricing: PricingPolicy) -> Self {
        Self { store, pricing }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate every referenced ID and copy the current catalog rows.
    ///
    /// Reads only; nothing is written, so a failed lookup leaves no trace.
    /// Order lines check existence, not availability.
    pub async fn build_snapshots(
        &self,
        menu_ids: &[DbId],
        product_ids: &[DbId],
    ) -> Result<OrderSnapshots, S::Error> {
        let menu_ids = distinct_ids(menu_ids);
        let product_ids = distinct_ids(product_ids);

        let menus = if menu_ids.is_empty() {
            Vec::new()
        } else {
            let found = self.store.find_menus(&menu_ids).await?;
            snapshot_menus(&menu_ids, &found)?
        };

        let products = if product_ids.is_empty() {
            Vec::new()
        } else {
            let found = self.store.find_products(&product_ids).await?;
            snapshot_products(&product_ids, &found, false)?
        };

        Ok(OrderSnapshots { menus, products })
    }

    /// Create an order in `pending` status with snapshots of every reference.
    pub async fn create(&self, draft: CommandeDraft) -> Result<S::Record, S::Error> {
        ensure_has_lines(&draft.menus, &draft.products)?;

        let lines = self.build_snapshots(&draft.menus, &draft.products).await?;
        let price = self.pricing.resolve(draft.price, &lines)?;

        tracing::info!(
            menus = lines.menus.len(),
            products = lines.products.len(),
            %price,
            "Creating commande"
        );

        self.store
            .insert(NewCommande {
                status: OrderStatus::Pending,
                price,
                lines,
            })
            .await
    }

    /// Rewrite an order on behalf of `gate`, the role whose status rules apply.
    ///
    /// Checks run before any write: the order must exist, then the status must
    /// be allowed for `gate`, then every reference must resolve. The line set
    /// is replaced wholesale, so repeating the same call is idempotent.
    pub async fn update(
        &self,
        id: DbId,
        gate: Role,
        change: CommandeChange,
    ) -> Result<S::Record, S::Error> {
        if self.store.find(id).await?.is_none() {
            return Err(not_found(id).into());
        }

        ensure_status_allowed(gate, change.status)?;
        ensure_has_lines(&change.menus, &change.products)?;

        let lines = self.build_snapshots(&change.menus, &change.products).await?;
        let price = self.pricing.resolve(change.price, &lines)?;

        tracing::info!(
            commande_id = id,
            role = %gate,
            status = %change.status,
            %price,
            "Updating commande"
        );

        self.store
            .replace(
                id,
                NewCommande {
                    status: change.status,
                    price,
                    lines,
                },
            )
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    pub async fn get(&self, id: DbId) -> Result<S::Record, S::Error> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// All non-deleted orders. Unpaginated.
    pub async fn list(&self) -> Result<Vec<S::Record>, S::Error> {
        self.store.list().await
    }

    pub async fn delete(&self, id: DbId) -> Result<(), S::Error> {
        if self.store.soft_delete(id).await? {
            tracing::info!(commande_id = id, "Commande deleted");
            Ok(())
        } else {
            Err(not_found(id).into())
        }
    }
}

/// An order must reference at least one menu or product.
pub fn ensure_has_lines(menus: &[DbId], products: &[DbId]) -> Result<(), CoreError> {
    if menus.is_empty() && products.is_empty() {
        return Err(CoreError::Validation(
            "A commande must contain at least one menu or product".into(),
        ));
    }
    Ok(())
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: ENTITY_COMMANDE,
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_order_rejected() {
        assert!(ensure_has_lines(&[], &[]).is_err());
        assert!(ensure_has_lines(&[1], &[]).is_ok());
        assert!(ensure_has_lines(&[], &[1]).is_ok());
    }

    #[test]
    fn change_requires_status_but_defaults_lines() {
        let change: CommandeChange = serde_json::from_str(r#"{"status":"ready"}"#).unwrap();
        assert_eq!(change.status, OrderStatus::Ready);
        assert!(change.menus.is_empty());
        assert!(change.price.is_none());

        let missing: Result<CommandeChange, _> = serde_json::from_str(r#"{"menus":[1]}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn draft_accepts_string_or_number_price() {
        let draft: CommandeDraft =
            serde_json::from_str(r#"{"menus":[1],"price":"21.50"}"#).unwrap();
        assert_eq!(draft.price.unwrap().to_string(), "21.50");

        let draft: CommandeDraft = serde_json::from_str(r#"{"products":[2],"price":9}"#).unwrap();
        assert_eq!(draft.price.unwrap().to_string(), "9");
    }
}
