//! Menu and menu item models.
//!
//! A menu item is a snapshot of a product taken when the menu was written.

use restau_core::snapshot::CatalogMenu;
use restau_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `menus` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Menu {
    pub id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Menu> for CatalogMenu {
    fn from(row: Menu) -> Self {
        CatalogMenu {
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub menu_id: DbId,
    pub product_id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A menu together with its item snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct MenuWithItems {
    #[serde(flatten)]
    pub menu: Menu,
    pub items: Vec<MenuItem>,
}

/// DTO for creating a menu. `items` are product IDs.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenu {
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub items: Vec<DbId>,
}

/// DTO for updating a menu. When `items` is present the item set is replaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenu {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub items: Option<Vec<DbId>>,
}
