//! Repository for the `menus` and `menu_items` tables.

use std::collections::HashMap;

use restau_core::snapshot::ProductSnapshot;
use restau_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu::{CreateMenu, Menu, MenuItem, MenuWithItems, UpdateMenu};

const COLUMNS: &str = "id, name, price, description, image_url, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, menu_id, product_id, name, price, description, image_url, \
                            product_type, created_at, updated_at";

/// Provides CRUD operations for menus and their item snapshots.
pub struct MenuRepo;

impl MenuRepo {
    /// Insert a menu and its item snapshots in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMenu,
        items: &[ProductSnapshot],
    ) -> Result<MenuWithItems, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO menus (name, price, description, image_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let menu = sqlx::query_as::<_, Menu>(&insert_query)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(&mut *tx)
            .await?;

        let items = Self::set_items_inner(&mut tx, menu.id, items).await?;

        tx.commit().await?;
        Ok(MenuWithItems { menu, items })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menus WHERE id = $1 AND deleted_at IS NULL");
        let Some(menu) = sqlx::query_as::<_, Menu>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let items_query =
            format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE menu_id = $1 ORDER BY id");
        let items = sqlx::query_as::<_, MenuItem>(&items_query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(MenuWithItems { menu, items }))
    }

    /// Batched lookup of live menu rows (without items) by ID.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Menu>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menus WHERE id = ANY($1) AND deleted_at IS NULL ORDER BY id"
        );
        sqlx::query_as::<_, Menu>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List live menus with their items. Items are fetched in one batched query.
    pub async fn list(pool: &PgPool) -> Result<Vec<MenuWithItems>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM menus WHERE deleted_at IS NULL ORDER BY name, id");
        let menus = sqlx::query_as::<_, Menu>(&query).fetch_all(pool).await?;
        if menus.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = menus.iter().map(|m| m.id).collect();
        let items_query = format!(
            "SELECT {ITEM_COLUMNS} FROM menu_items WHERE menu_id = ANY($1) ORDER BY id"
        );
        let items = sqlx::query_as::<_, MenuItem>(&items_query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_menu: HashMap<DbId, Vec<MenuItem>> = HashMap::new();
        for item in items {
            by_menu.entry(item.menu_id).or_default().push(item);
        }

        Ok(menus
            .into_iter()
            .map(|menu| {
                let items = by_menu.remove(&menu.id).unwrap_or_default();
                MenuWithItems { menu, items }
            })
            .collect())
    }

    /// Update menu fields and, when `items` is `Some`, replace the item set.
    ///
    /// Runs in one transaction. Returns `None` if the menu does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenu,
        items: Option<&[ProductSnapshot]>,
    ) -> Result<Option<MenuWithItems>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let update_query = format!(
            "UPDATE menus SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                image_url = COALESCE($5, image_url)
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let Some(menu) = sqlx::query_as::<_, Menu>(&update_query)
            .bind(id)
            .bind(&input.name)
            .bind(input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let items = match items {
            Some(items) => Self::set_items_inner(&mut tx, id, items).await?,
            None => {
                let items_query =
                    format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE menu_id = $1 ORDER BY id");
                sqlx::query_as::<_, MenuItem>(&items_query)
                    .bind(id)
                    .fetch_all(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(Some(MenuWithItems { menu, items }))
    }

    /// Soft-delete a menu. Its items are left in place.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE menus SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Replace the item snapshots of a menu within an existing transaction.
    async fn set_items_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        menu_id: DbId,
        items: &[ProductSnapshot],
    ) -> Result<Vec<MenuItem>, sqlx::Error> {
        sqlx::query("DELETE FROM menu_items WHERE menu_id = $1")
            .bind(menu_id)
            .execute(&mut **tx)
            .await?;

        let insert_query = format!(
            "INSERT INTO menu_items
                (menu_id, product_id, name, price, description, image_url, product_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, MenuItem>(&insert_query)
                .bind(menu_id)
                .bind(item.product_id)
                .bind(&item.name)
                .bind(item.price)
                .bind(&item.description)
                .bind(&item.image_url)
                .bind(item.product_type.as_str())
                .fetch_one(&mut **tx)
                .await?;
            rows.push(row);
        }

        Ok(rows)
    }
}
