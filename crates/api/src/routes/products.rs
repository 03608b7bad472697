use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/api/products`.
///
/// ```text
/// GET    /            -> list_products (auth)
/// POST   /            -> create_product (admin)
/// GET    /available   -> list_available (auth, ?type=)
/// GET    /{id}        -> get_product (auth)
/// PUT    /{id}        -> update_product (admin)
/// DELETE /{id}        -> delete_product (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route("/available", get(products::list_available))
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
