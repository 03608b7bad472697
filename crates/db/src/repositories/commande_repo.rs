//! Repository for the `commandes` table and its two line tables.
//!
//! Lines are only ever read through a live parent, so a soft-deleted order
//! hides its lines without touching them.

use std::collections::HashMap;

use restau_core::commande::NewCommande;
use restau_core::snapshot::OrderSnapshots;
use restau_core::types::DbId;
use sqlx::PgPool;

use crate::models::commande::{Commande, CommandeMenu, CommandeProduct, CommandeWithLines};

const COLUMNS: &str = "id, status, price, created_at, updated_at";

const MENU_LINE_COLUMNS: &str = "id, commande_id, menu_id, name, price, description, image_url";

const PRODUCT_LINE_COLUMNS: &str =
    "id, commande_id, product_id, name, price, description, image_url, product_type";

/// Persistence for orders. Every write of an order and its lines is one transaction.
pub struct CommandeRepo;

impl CommandeRepo {
    /// Insert an order and all of its line snapshots atomically.
    pub async fn create(
        pool: &PgPool,
        input: &NewCommande,
    ) -> Result<CommandeWithLines, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO commandes (status, price)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let commande = sqlx::query_as::<_, Commande>(&insert_query)
            .bind(input.status.as_str())
            .bind(input.price)
            .fetch_one(&mut *tx)
            .await?;

        let (menus, products) = Self::set_lines_inner(&mut tx, commande.id, &input.lines).await?;

        tx.commit().await?;
        Ok(CommandeWithLines {
            commande,
            menus,
            products,
        })
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommandeWithLines>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM commandes WHERE id = $1 AND deleted_at IS NULL");
        let Some(commande) = sqlx::query_as::<_, Commande>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let mut lines = Self::lines_for(pool, &[id]).await?;
        let (menus, products) = lines.remove(&id).unwrap_or_default();
        Ok(Some(CommandeWithLines {
            commande,
            menus,
            products,
        }))
    }

    /// List live orders, newest first, with lines fetched in two batched queries.
    pub async fn list(pool: &PgPool) -> Result<Vec<CommandeWithLines>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM commandes WHERE deleted_at IS NULL ORDER BY created_at DESC, id DESC"
        );
        let commandes = sqlx::query_as::<_, Commande>(&query).fetch_all(pool).await?;
        if commandes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = commandes.iter().map(|c| c.id).collect();
        let mut lines = Self::lines_for(pool, &ids).await?;

        Ok(commandes
            .into_iter()
            .map(|commande| {
                let (menus, products) = lines.remove(&commande.id).unwrap_or_default();
                CommandeWithLines {
                    commande,
                    menus,
                    products,
                }
            })
            .collect())
    }

    /// Overwrite status, price and every line of an order.
    ///
    /// The order row is locked with `FOR UPDATE` for the duration, so
    /// concurrent replacements of the same order are applied one after the
    /// other. Returns `None` if no live order has this ID.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &NewCommande,
    ) -> Result<Option<CommandeWithLines>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM commandes WHERE id = $1 AND deleted_at IS NULL FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let update_query = format!(
            "UPDATE commandes SET status = $2, price = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let commande = sqlx::query_as::<_, Commande>(&update_query)
            .bind(id)
            .bind(input.status.as_str())
            .bind(input.price)
            .fetch_one(&mut *tx)
            .await?;

        let (menus, products) = Self::set_lines_inner(&mut tx, id, &input.lines).await?;

        tx.commit().await?;
        Ok(Some(CommandeWithLines {
            commande,
            menus,
            products,
        }))
    }

    /// Soft-delete an order. Returns `true` if a live row was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE commandes SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Delete every line of an order and insert `lines` in its place.
    async fn set_lines_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        commande_id: DbId,
        lines: &OrderSnapshots,
    ) -> Result<(Vec<CommandeMenu>, Vec<CommandeProduct>), sqlx::Error> {
        sqlx::query("DELETE FROM commande_menus WHERE commande_id = $1")
            .bind(commande_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query("DELETE FROM commande_products WHERE commande_id = $1")
            .bind(commande_id)
            .execute(&mut **tx)
            .await?;

        let menu_query = format!(
            "INSERT INTO commande_menus
                (commande_id, menu_id, name, price, description, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {MENU_LINE_COLUMNS}"
        );
        let mut menus = Vec::with_capacity(lines.menus.len());
        for line in &lines.menus {
            let row = sqlx::query_as::<_, CommandeMenu>(&menu_query)
                .bind(commande_id)
                .bind(line.menu_id)
                .bind(&line.name)
                .bind(line.price)
                .bind(&line.description)
                .bind(&line.image_url)
                .fetch_one(&mut **tx)
                .await?;
            menus.push(row);
        }

        let product_query = format!(
            "INSERT INTO commande_products
                (commande_id, product_id, name, price, description, image_url, product_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_LINE_COLUMNS}"
        );
        let mut products = Vec::with_capacity(lines.products.len());
        for line in &lines.products {
            let row = sqlx::query_as::<_, CommandeProduct>(&product_query)
                .bind(commande_id)
                .bind(line.product_id)
                .bind(&line.name)
                .bind(line.price)
                .bind(&line.description)
                .bind(&line.image_url)
                .bind(line.product_type.as_str())
                .fetch_one(&mut **tx)
                .await?;
            products.push(row);
        }

        Ok((menus, products))
    }

    /// Fetch the lines of the given orders, grouped by order ID.
    async fn lines_for(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, (Vec<CommandeMenu>, Vec<CommandeProduct>)>, sqlx::Error> {
        let menu_query = format!(
            "SELECT {MENU_LINE_COLUMNS} FROM commande_menus WHERE commande_id = ANY($1) ORDER BY id"
        );
        let menus = sqlx::query_as::<_, CommandeMenu>(&menu_query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let product_query = format!(
            "SELECT {PRODUCT_LINE_COLUMNS} FROM commande_products \
             WHERE commande_id = ANY($1) ORDER BY id"
        );
        let products = sqlx::query_as::<_, CommandeProduct>(&product_query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, (Vec<CommandeMenu>, Vec<CommandeProduct>)> = HashMap::new();
        for line in menus {
            grouped.entry(line.commande_id).or_default().0.push(line);
        }
        for line in products {
            grouped.entry(line.commande_id).or_default().1.push(line);
        }
        Ok(grouped)
    }
}
