//! User entity model and DTOs.

use lemon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
}

/// One entry of a group roster as exposed by the API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GroupMember {
    #[serde(rename = "user_id")]
    pub id: DbId,
    pub username: String,
}
