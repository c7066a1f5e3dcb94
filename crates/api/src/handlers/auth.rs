//! Handlers for the `/auth` resource (registration, token login, current user).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lemon_core::error::CoreError;
use lemon_core::roles::Role;
use lemon_core::types::DbId;
use lemon_db::models::user::CreateUser;
use lemon_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    pub password: String,
}

/// Request body for `POST /auth/token/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Public view of a newly registered account.
#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
}

/// The caller's own account, with the role the API resolves for them.
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/users
///
/// Register a customer account. New accounts belong to no group.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisteredUser>)> {
    validate_new_password(&input.password, &input.username)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email.unwrap_or_default(),
            password_hash,
            is_superuser: false,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: user.id,
            username: user.username,
            email: user.email,
        }),
    ))
}

/// POST /api/v1/auth/token/login
///
/// Exchange username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    let valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid());
    }

    let auth_token = state
        .config
        .jwt
        .issue(user.id, &user.username)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(TokenResponse {
        auth_token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

/// GET /api/v1/auth/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<CurrentUser>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(CurrentUser {
        id: user.id,
        username: user.username,
        email: user.email,
        role: auth.role,
    }))
}
