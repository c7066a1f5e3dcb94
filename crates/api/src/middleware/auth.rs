//! Bearer-token authentication.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use lemon_core::error::CoreError;
use lemon_core::roles::Role;
use lemon_core::types::DbId;
use lemon_db::repositories::UserRepo;

use crate::error::AppError;
use crate::state::AppState;

/// The caller behind a valid `Authorization: Bearer <token>` header.
///
/// Taking `AuthUser` as a handler argument makes the route require
/// authentication. The role reflects group membership at request time, so a
/// user added to "Manager" gains manager access without a new token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub role: Role,
}

fn unauthorized(msg: &str) -> AppError {
    CoreError::Unauthorized(msg.to_string()).into()
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Authentication credentials were not provided"))?;

    value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Expected an Authorization header of the form 'Bearer <token>'"))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts)?;

        let claims = state.config.jwt.verify(token).map_err(|err| {
            tracing::debug!(error = %err, "Rejected bearer token");
            unauthorized("Invalid or expired token")
        })?;

        let Some(user) = UserRepo::find_by_id(&state.pool, claims.sub).await? else {
            return Err(unauthorized("Token refers to a user that no longer exists"));
        };

        let groups = UserRepo::group_names(&state.pool, user.id).await?;

        Ok(AuthUser {
            role: Role::resolve(user.is_superuser, &groups),
            user_id: user.id,
            username: user.username,
        })
    }
}
