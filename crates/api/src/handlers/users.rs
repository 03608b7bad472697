//! Handlers for the `/api/users` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use restau_core::error::CoreError;
use restau_core::roles::Role;
use restau_core::types::DbId;
use restau_db::models::user::{CreateUser, UpdateUser, UserResponse};
use restau_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use super::auth::normalize_email;
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const ENTITY_USER: &str = "User";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/users`. Any role, including `admin`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    pub password: String,
    pub role: Role,
    pub description: Option<String>,
}

/// Request body for `PUT /api/users/{id}`. Password changes go through
/// `POST /api/users/{id}/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    pub description: Option<String>,
}

/// Request body for `POST /api/users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(mut input): AppJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            role: input.role.as_str().to_string(),
            description: input.description,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, created_by = admin.user_id, "User created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_USER,
            id,
        }))?;
    Ok(Json(UserResponse::from(user)))
}

/// PUT /api/users/{id}
///
/// Update email, role or description. Omitted fields are left unchanged.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    input.email = input.email.as_deref().map(normalize_email);
    input.validate()?;

    let update_dto = UpdateUser {
        email: input.email,
        role: input.role.map(|r| r.as_str().to_string()),
        description: input.description,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: ENTITY_USER,
            id,
        }))?;

    tracing::info!(user_id = user.id, role = %user.role, "User updated");
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/users/{id}
///
/// Soft-delete a user. An admin cannot delete their own account.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot delete their own account".into(),
        )));
    }

    if UserRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(user_id = id, deleted_by = admin.user_id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: ENTITY_USER,
            id,
        }))
    }
}

/// POST /api/users/{id}/password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    if UserRepo::update_password(&state.pool, id, &password_hash).await? {
        tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: ENTITY_USER,
            id,
        }))
    }
}
