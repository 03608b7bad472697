//! Handlers for the `/api/menus` resource.
//!
//! Menu items are snapshots of available products taken when the menu is
//! created or its item list is replaced.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use restau_core::catalog::{validate_name, validate_price};
use restau_core::error::CoreError;
use restau_core::snapshot::{distinct_ids, snapshot_products, CatalogProduct, ProductSnapshot};
use restau_core::types::DbId;
use restau_db::models::menu::{CreateMenu, MenuWithItems, UpdateMenu};
use restau_db::repositories::{MenuRepo, ProductRepo};
use restau_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY_MENU: &str = "Menu";

/// POST /api/menus
pub async fn create_menu(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(mut input): AppJson<CreateMenu>,
) -> AppResult<(StatusCode, Json<MenuWithItems>)> {
    validate_name(&input.name)?;
    validate_price(input.price)?;
    input.name = input.name.trim().to_string();

    let items = snapshot_menu_items(&state.pool, &input.items).await?;
    let menu = MenuRepo::create(&state.pool, &input, &items).await?;

    tracing::info!(menu_id = menu.menu.id, items = menu.items.len(), "Menu created");
    Ok((StatusCode::CREATED, Json(menu)))
}

/// GET /api/menus
///
/// Public: the menu card is readable without logging in.
pub async fn list_menus(State(state): State<AppState>) -> AppResult<Json<Vec<MenuWithItems>>> {
    Ok(Json(MenuRepo::list(&state.pool).await?))
}

/// GET /api/menus/{id}
pub async fn get_menu(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MenuWithItems>> {
    MenuRepo::find_by_id(&state.pool, id)
        .await?
        .map(Json)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_MENU,
            id,
        }))
}

/// PUT /api/menus/{id}
///
/// Partial update. When `items` is given the whole item set is re-snapshotted.
pub async fn update_menu(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateMenu>,
) -> AppResult<Json<MenuWithItems>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
        input.name = Some(name.trim().to_string());
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let items = match &input.items {
        Some(ids) => Some(snapshot_menu_items(&state.pool, ids).await?),
        None => None,
    };

    let menu = MenuRepo::update(&state.pool, id, &input, items.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_MENU,
            id,
        }))?;

    tracing::info!(menu_id = id, items = menu.items.len(), "Menu updated");
    Ok(Json(menu))
}

/// DELETE /api/menus/{id}
pub async fn delete_menu(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if MenuRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(menu_id = id, "Menu deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: ENTITY_MENU,
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve product IDs to snapshots. Every product must exist and be available.
async fn snapshot_menu_items(pool: &DbPool, ids: &[DbId]) -> AppResult<Vec<ProductSnapshot>> {
    if ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A menu must contain at least one product".into(),
        )));
    }

    let ids = distinct_ids(ids);
    let found = ProductRepo::find_by_ids(pool, &ids)
        .await?
        .into_iter()
        .map(CatalogProduct::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(snapshot_products(&ids, &found, true)?)
}
