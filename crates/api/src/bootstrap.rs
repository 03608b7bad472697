//! Startup provisioning of the first admin account.

use restau_core::roles::ROLE_ADMIN;
use restau_db::models::user::CreateUser;
use restau_db::repositories::UserRepo;
use restau_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};
use crate::handlers::auth::normalize_email;

/// Create the configured admin unless a live user already holds that email.
///
/// An existing account is left untouched, whatever its role.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<()> {
    let email = normalize_email(&admin.email);

    if let Some(existing) = UserRepo::find_by_email(pool, &email).await? {
        tracing::info!(user_id = existing.id, %email, "Bootstrap admin already present");
        return Ok(());
    }

    validate_password_strength(&admin.password).map_err(AppError::BadRequest)?;
    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.clone(),
            password_hash,
            role: ROLE_ADMIN.to_string(),
            description: Some("Bootstrap administrator".to_string()),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, %email, "Bootstrap admin created");
    Ok(())
}
