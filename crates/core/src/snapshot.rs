//! Point-in-time copies of catalog rows attached to orders and menus.
//!
//! A snapshot is built from the catalog row as read at call time and is never
//! refreshed afterwards. The source ID is kept for traceability only.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::ProductType;
use crate::error::CoreError;
use crate::types::{DbId, Money};

/// Entity labels used in lookup errors.
pub const ENTITY_MENU: &str = "menu";
pub const ENTITY_PRODUCT: &str = "product";

/// A menu as currently stored in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogMenu {
    pub id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// A product as currently stored in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub product_type: ProductType,
    pub is_available: bool,
}

/// Copy of a menu's fields, written as an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub menu_id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Copy of a product's fields, written as an order line or a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

impl From<&CatalogMenu> for MenuSnapshot {
    fn from(menu: &CatalogMenu) -> Self {
        Self {
            menu_id: menu.id,
            name: menu.name.clone(),
            price: menu.price,
            description: menu.description.clone(),
            image_url: menu.image_url.clone(),
        }
    }
}

impl From<&CatalogProduct> for ProductSnapshot {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            product_type: product.product_type,
        }
    }
}

/// The full set of line snapshots for one order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSnapshots {
    pub menus: Vec<MenuSnapshot>,
    pub products: Vec<ProductSnapshot>,
}

impl OrderSnapshots {
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty() && self.products.is_empty()
    }

    /// Sum of every snapshot price.
    pub fn total(&self) -> Money {
        let menus: Money = self.menus.iter().map(|m| m.price).sum();
        let products: Money = self.products.iter().map(|p| p.price).sum();
        menus + products
    }
}

/// De-duplicate requested IDs, keeping first-seen order.
pub fn distinct_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Fail unless a batched lookup returned one row per requested ID.
pub fn ensure_all_found(
    entity: &'static str,
    requested: usize,
    found: usize,
) -> Result<(), CoreError> {
    if requested == found {
        Ok(())
    } else {
        Err(CoreError::MissingReferences { entity })
    }
}

/// Build menu snapshots for `requested` (already distinct) from the rows the
/// catalog returned. Output follows the order of `requested`.
pub fn snapshot_menus(
    requested: &[DbId],
    found: &[CatalogMenu],
) -> Result<Vec<MenuSnapshot>, CoreError> {
    ensure_all_found(ENTITY_MENU, requested.len(), found.len())?;
    let by_id: HashMap<DbId, &CatalogMenu> = found.iter().map(|m| (m.id, m)).collect();
    requested
        .iter()
        .map(|id| {
            by_id
                .get(id)
                .map(|m| MenuSnapshot::from(*m))
                .ok_or(CoreError::MissingReferences {
                    entity: ENTITY_MENU,
                })
        })
        .collect()
}

/// Build product snapshots for `requested` (already distinct).
///
/// With `require_available`, unavailable products count as missing. Order
/// lines check existence only; menu items also require availability.
pub fn snapshot_products(
    requested: &[DbId],
    found: &[CatalogProduct],
    require_available: bool,
) -> Result<Vec<ProductSnapshot>, CoreError> {
    let eligible: HashMap<DbId, &CatalogProduct> = found
        .iter()
        .filter(|p| !require_available || p.is_available)
        .map(|p| (p.id, p))
        .collect();
    ensure_all_found(ENTITY_PRODUCT, requested.len(), eligible.len())?;
    requested
        .iter()
        .map(|id| {
            eligible
                .get(id)
                .map(|p| ProductSnapshot::from(*p))
                .ok_or(CoreError::MissingReferences {
                    entity: ENTITY_PRODUCT,
                })
        })
        .collect()
}
