pub mod auth;
pub mod cart;
pub mod categories;
pub mod groups;
pub mod health;
pub mod menu_items;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/users                                      register (public)
/// /auth/token/login                                token login (public)
/// /auth/users/me                                   current user
///
/// /categories                                      list, create
/// /categories/{id}                                 get, put, patch, delete
///
/// /menu-items                                      list (public), create
/// /menu-items/{id}                                 get (public), put, patch, delete
///
/// /cart/menu-items                                 list, add, clear (customer)
///
/// /orders                                          list (role-scoped), place
/// /orders/{id}                                     get, put, patch, delete
///
/// /groups/manager/users                            list, add (manager)
/// /groups/manager/users/{id}                       remove (manager)
/// /groups/delivery-crew/users                      list, add (manager)
/// /groups/delivery-crew/users/{id}                 remove (manager)
/// ```
///
/// Trailing slashes are stripped before routing (see `router::build_app`).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Registration, token login, current user.
        .nest("/auth", auth::router())
        // Menu catalog.
        .merge(categories::router())
        .merge(menu_items::router())
        // Customer cart.
        .nest("/cart", cart::router())
        // Orders.
        .merge(orders::router())
        // Manager and delivery crew rosters.
        .nest("/groups", groups::router())
}
