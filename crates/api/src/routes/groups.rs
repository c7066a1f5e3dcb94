//! Route definitions for the group rosters.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::groups;
use crate::state::AppState;

/// Routes mounted at `/groups`. All require a manager.
///
/// ```text
/// GET    /manager/users                -> list_managers
/// POST   /manager/users                -> add_manager
/// DELETE /manager/users/{id}           -> remove_manager
/// GET    /delivery-crew/users          -> list_delivery_crew
/// POST   /delivery-crew/users          -> add_delivery_crew
/// DELETE /delivery-crew/users/{id}     -> remove_delivery_crew
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/manager/users",
            get(groups::list_managers).post(groups::add_manager),
        )
        .route("/manager/users/{id}", delete(groups::remove_manager))
        .route(
            "/delivery-crew/users",
            get(groups::list_delivery_crew).post(groups::add_delivery_crew),
        )
        .route(
            "/delivery-crew/users/{id}",
            delete(groups::remove_delivery_crew),
        )
}
