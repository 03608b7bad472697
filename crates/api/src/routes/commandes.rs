use axum::routing::{get, put};
use axum::Router;

use crate::handlers::commandes;
use crate::state::AppState;

/// Routes mounted at `/api/commandes`.
///
/// ```text
/// GET    /               -> list_commandes (auth)
/// POST   /               -> create_commande (auth)
/// GET    /{id}           -> get_commande (auth)
/// DELETE /{id}           -> delete_commande (admin)
/// PUT    /admin/{id}     -> update_as_admin
/// PUT    /preparer/{id}  -> update_as_preparer (preparer or admin)
/// PUT    /receiver/{id}  -> update_as_receiver (receiver or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(commandes::list_commandes).post(commandes::create_commande),
        )
        .route(
            "/{id}",
            get(commandes::get_commande).delete(commandes::delete_commande),
        )
        .route("/admin/{id}", put(commandes::update_as_admin))
        .route("/preparer/{id}", put(commandes::update_as_preparer))
        .route("/receiver/{id}", put(commandes::update_as_receiver))
}
