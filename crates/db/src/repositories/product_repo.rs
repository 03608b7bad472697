//! Repository for the `products` table.

use restau_core::catalog::ProductType;
use restau_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

const COLUMNS: &str = "id, name, price, is_available, description, image_url, product_type, \
                       created_at, updated_at";

/// Provides CRUD operations for products. Deleted products are invisible to every read.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product. `is_available` defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name, price, is_available, description, image_url, product_type)
             VALUES ($1, $2, COALESCE($3, true), $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.is_available)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.product_type.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Batched lookup of live products by ID. Unknown IDs are simply absent.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE id = ANY($1) AND deleted_at IS NULL ORDER BY id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE deleted_at IS NULL ORDER BY name, id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Available products of one type, ordered by name.
    pub async fn list_available_by_type(
        pool: &PgPool,
        product_type: ProductType,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE product_type = $1 AND is_available = true AND deleted_at IS NULL
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(product_type.as_str())
            .fetch_all(pool)
            .await
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                is_available = COALESCE($4, is_available),
                description = COALESCE($5, description),
                image_url = COALESCE($6, image_url),
                product_type = COALESCE($7, product_type)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.is_available)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.product_type.map(ProductType::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a product. Order lines and menu items that copied it are untouched.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
