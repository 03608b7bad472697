//! Handlers for the `/api/commandes` resource.
//!
//! There is one update endpoint per role. The route decides which status
//! table applies; an admin calling the preparer endpoint is held to the
//! preparer's statuses.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use restau_core::commande::{CommandeChange, CommandeDraft};
use restau_core::roles::Role;
use restau_core::types::DbId;
use restau_db::models::commande::CommandeWithLines;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequirePreparer, RequireReceiver};
use crate::state::AppState;

/// POST /api/commandes
///
/// Create an order in `pending` status from menu and product IDs.
pub async fn create_commande(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppJson(draft): AppJson<CommandeDraft>,
) -> AppResult<(StatusCode, Json<CommandeWithLines>)> {
    let commande = state.commandes().create(draft).await?;
    tracing::info!(
        commande_id = commande.commande.id,
        user_id = user.user_id,
        role = %user.role,
        "Commande created"
    );
    Ok((StatusCode::CREATED, Json(commande)))
}

/// GET /api/commandes
pub async fn list_commandes(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<CommandeWithLines>>> {
    Ok(Json(state.commandes().list().await?))
}

/// GET /api/commandes/{id}
pub async fn get_commande(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<CommandeWithLines>> {
    Ok(Json(state.commandes().get(id).await?))
}

/// PUT /api/commandes/admin/{id}
pub async fn update_as_admin(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(change): AppJson<CommandeChange>,
) -> AppResult<Json<CommandeWithLines>> {
    update_with_gate(&state, user, Role::Admin, id, change).await
}

/// PUT /api/commandes/preparer/{id}
pub async fn update_as_preparer(
    State(state): State<AppState>,
    RequirePreparer(user): RequirePreparer,
    AppPath(id): AppPath<DbId>,
    AppJson(change): AppJson<CommandeChange>,
) -> AppResult<Json<CommandeWithLines>> {
    update_with_gate(&state, user, Role::Preparer, id, change).await
}

/// PUT /api/commandes/receiver/{id}
pub async fn update_as_receiver(
    State(state): State<AppState>,
    RequireReceiver(user): RequireReceiver,
    AppPath(id): AppPath<DbId>,
    AppJson(change): AppJson<CommandeChange>,
) -> AppResult<Json<CommandeWithLines>> {
    update_with_gate(&state, user, Role::Receiver, id, change).await
}

/// DELETE /api/commandes/{id}
///
/// Soft delete; the lines stay in place as history.
pub async fn delete_commande(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    state.commandes().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_with_gate(
    state: &AppState,
    user: AuthUser,
    gate: Role,
    id: DbId,
    change: CommandeChange,
) -> AppResult<Json<CommandeWithLines>> {
    tracing::debug!(commande_id = id, user_id = user.user_id, role = %user.role, %gate, "Commande update requested");
    Ok(Json(state.commandes().update(id, gate, change).await?))
}
