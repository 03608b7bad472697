//! Handlers for the `/auth` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use restau_core::error::CoreError;
use restau_core::roles::Role;
use restau_db::models::user::{CreateUser, UserResponse};
use restau_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Single message for every failed login, so callers cannot probe for accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    pub role: Role,
    pub description: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Public self-registration for staff accounts. `admin` cannot be requested
/// here; admins are created by another admin or at startup.
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;

    if input.role == Role::Admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin accounts cannot be self-registered".into(),
        )));
    }

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

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

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /auth/login
///
/// Authenticate with email + password. Returns a bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input.validate()?;
    let email = normalize_email(&input.email);

    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        tracing::warn!(%email, "Login failed: unknown email");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Canonical stored form of an email: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Chef@Restau.TEST "), "chef@restau.test");
    }

    #[test]
    fn register_request_validation() {
        let ok = RegisterRequest {
            email: "chef@restau.test".into(),
            password: "secret".into(),
            role: Role::Preparer,
            description: None,
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            password: "12345".into(),
            ..ok
        };
        assert!(short.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            password: "secret".into(),
            role: Role::Receiver,
            description: None,
        };
        assert!(bad_email.validate().is_err());
    }
}
