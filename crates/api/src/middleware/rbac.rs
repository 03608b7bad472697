//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role is not in
//! its allow-list with 403 Forbidden.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use restau_core::error::CoreError;
use restau_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate, then require the caller's role to be in `allowed`.
async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    allowed: &[Role],
    message: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.role.is_one_of(allowed) {
        return Err(AppError::Core(CoreError::Forbidden(message.into())));
    }
    Ok(user)
}

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(parts, state, &[Role::Admin], "Admin role required")
            .await
            .map(RequireAdmin)
    }
}

/// Requires `preparer` or `admin` (kitchen endpoints).
pub struct RequirePreparer(pub AuthUser);

impl FromRequestParts<AppState> for RequirePreparer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            &[Role::Preparer, Role::Admin],
            "Preparer or Admin role required",
        )
        .await
        .map(RequirePreparer)
    }
}

/// Requires `receiver` or `admin` (front-of-house endpoints).
pub struct RequireReceiver(pub AuthUser);

impl FromRequestParts<AppState> for RequireReceiver {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            &[Role::Receiver, Role::Admin],
            "Receiver or Admin role required",
        )
        .await
        .map(RequireReceiver)
    }
}

/// Requires any authenticated user.
///
/// Equivalent to [`AuthUser`], named for route signatures where "must be
/// logged in" should read explicitly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
