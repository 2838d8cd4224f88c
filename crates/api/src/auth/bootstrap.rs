//! Initial administrator account.

use oneway_core::validation::{require_non_empty, validate_email};
use oneway_db::models::user::UserRecord;
use oneway_db::repositories::UserRepo;
use oneway_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminAccount;
use crate::error::AppError;

/// Create the administrator account unless a user with that username exists.
///
/// Returns `true` when a row was inserted. An existing account is left
/// untouched, including its password.
pub async fn ensure_admin(pool: &DbPool, admin: &AdminAccount) -> Result<bool, AppError> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %admin.username, "Admin account already present");
        return Ok(false);
    }

    require_non_empty("username", &admin.username)?;
    require_non_empty("password", &admin.password)?;
    validate_email(&admin.email)?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Failed to hash admin password: {e}")))?;

    let user = UserRepo::create(
        pool,
        &UserRecord {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Created admin account");
    Ok(true)
}
