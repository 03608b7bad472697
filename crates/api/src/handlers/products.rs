//! Handlers for the `/api/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use restau_core::catalog::{validate_name, validate_price, ProductType};
use restau_core::error::CoreError;
use restau_core::types::DbId;
use restau_db::models::product::{CreateProduct, Product, UpdateProduct};
use restau_db::repositories::ProductRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

const ENTITY_PRODUCT: &str = "Product";

/// Query parameters for `GET /api/products/available`.
#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    #[serde(rename = "type")]
    pub product_type: ProductType,
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppJson(mut input): AppJson<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_name(&input.name)?;
    validate_price(input.price)?;
    input.name = input.name.trim().to_string();

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(product_id = product.id, product_type = %product.product_type, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(ProductRepo::list(&state.pool).await?))
}

/// GET /api/products/available?type=plat
///
/// Available products of one type, for building menus.
pub async fn list_available(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppQuery(query): AppQuery<AvailableQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list_available_by_type(&state.pool, query.product_type).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Product>> {
    ProductRepo::find_by_id(&state.pool, id)
        .await?
        .map(Json)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_PRODUCT,
            id,
        }))
}

/// PUT /api/products/{id}
///
/// Partial update. Existing menu items and order lines keep their copies.
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateProduct>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
        input.name = Some(name.trim().to_string());
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_PRODUCT,
            id,
        }))?;

    tracing::info!(product_id = id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(product_id = id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: ENTITY_PRODUCT,
            id,
        }))
    }
}
