//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /users          -> register
/// POST /token/login    -> login
/// GET  /users/me       -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(auth::register))
        .route("/token/login", post(auth::login))
        .route("/users/me", get(auth::me))
}
