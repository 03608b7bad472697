//! Product entity model and DTOs.

use restau_core::catalog::ProductType;
use restau_core::error::CoreError;
use restau_core::snapshot::CatalogProduct;
use restau_core::types::{DbId, Money, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Money,
    pub is_available: bool,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Product> for CatalogProduct {
    type Error = CoreError;

    fn try_from(row: Product) -> Result<Self, Self::Error> {
        Ok(CatalogProduct {
            product_type: row.product_type.parse::<ProductType>()?,
            id: row.id,
            name: row.name,
            price: row.price,
            description: row.description,
            image_url: row.image_url,
            is_available: row.is_available,
        })
    }
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: Money,
    pub is_available: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

/// DTO for updating a product. Only provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub is_available: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,
}
