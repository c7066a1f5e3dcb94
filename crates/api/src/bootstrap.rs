//! Startup provisioning of the first superuser.
//!
//! Registration only creates customers, so without this there would be no
//! way to obtain a manager on a fresh database.

use lemon_db::models::user::{CreateUser, User};
use lemon_db::repositories::UserRepo;
use lemon_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::{AppError, AppResult};

/// Create the configured superuser unless a user with that name exists.
///
/// Returns the new user, or `None` when the account was already present. An
/// existing account is left untouched (its password is not reset).
pub async fn ensure_bootstrap_admin(
    pool: &DbPool,
    admin: &BootstrapAdmin,
) -> AppResult<Option<User>> {
    if UserRepo::find_by_username(pool, &admin.username).await?.is_some() {
        tracing::debug!(username = %admin.username, "Bootstrap admin already exists");
        return Ok(None);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: String::new(),
            password_hash,
            is_superuser: true,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(Some(user))
}
