use axum::routing::get;
use axum::Router;

use crate::handlers::menus;
use crate::state::AppState;

/// Routes mounted at `/api/menus`. Reads are public.
///
/// ```text
/// GET    /       -> list_menus
/// POST   /       -> create_menu (admin)
/// GET    /{id}   -> get_menu
/// PUT    /{id}   -> update_menu (admin)
/// DELETE /{id}   -> delete_menu (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(menus::list_menus).post(menus::create_menu))
        .route(
            "/{id}",
            get(menus::get_menu)
                .put(menus::update_menu)
                .delete(menus::delete_menu),
        )
}
