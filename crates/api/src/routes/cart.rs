//! Route definitions for the caller's cart.

use axum::routing::get;
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`.
///
/// ```text
/// GET    /menu-items    -> list_cart
/// POST   /menu-items    -> add_to_cart
/// DELETE /menu-items    -> clear_cart
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/menu-items",
        get(cart::list_cart)
            .post(cart::add_to_cart)
            .delete(cart::clear_cart),
    )
}
