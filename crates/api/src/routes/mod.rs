pub mod auth;
pub mod commandes;
pub mod health;
pub mod menus;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                         list, create (admin)
/// /users/{id}                    get, update, delete (admin)
/// /users/{id}/password           reset password (admin)
///
/// /products                      list (auth), create (admin)
/// /products/available?type=      available products of one type (auth)
/// /products/{id}                 get (auth), update, delete (admin)
///
/// /menus                         list (public), create (admin)
/// /menus/{id}                    get (public), update, delete (admin)
///
/// /commandes                     list, create (auth)
/// /commandes/{id}                get (auth), delete (admin)
/// /commandes/admin/{id}          update (admin)
/// /commandes/preparer/{id}       update (preparer or admin)
/// /commandes/receiver/{id}       update (receiver or admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/menus", menus::router())
        .nest("/commandes", commandes::router())
}
