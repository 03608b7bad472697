//! Order (commande) models: the order row and its two line tables.

use restau_core::types::{DbId, Money, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `commandes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Commande {
    pub id: DbId,
    pub status: String,
    pub price: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A menu line of an order, copied from the catalog at write time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommandeMenu {
    pub id: DbId,
    pub commande_id: DbId,
    pub menu_id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// A product line of an order, copied from the catalog at write time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommandeProduct {
    pub id: DbId,
    pub commande_id: DbId,
    pub product_id: DbId,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
}

/// An order with both line collections loaded.
#[derive(Debug, Clone, Serialize)]
pub struct CommandeWithLines {
    #[serde(flatten)]
    pub commande: Commande,
    pub menus: Vec<CommandeMenu>,
    pub products: Vec<CommandeProduct>,
}
