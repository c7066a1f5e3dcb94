//! Route definitions for the `/orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes (merged at the API root).
///
/// ```text
/// GET    /orders          -> list_orders
/// POST   /orders          -> create_order
/// GET    /orders/{id}     -> get_order
/// PUT    /orders/{id}     -> update_order
/// PATCH  /orders/{id}     -> patch_order
/// DELETE /orders/{id}     -> delete_order
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/{id}",
            get(orders::get_order)
                .put(orders::update_order)
                .patch(orders::patch_order)
                .delete(orders::delete_order),
        )
}
