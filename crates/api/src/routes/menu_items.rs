//! Route definitions for the `/menu-items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::menu_items;
use crate::state::AppState;

/// Menu item routes (merged at the API root). Reads need no token.
///
/// ```text
/// GET    /menu-items          -> list_menu_items
/// POST   /menu-items          -> create_menu_item (manager)
/// GET    /menu-items/{id}     -> get_menu_item
/// PUT    /menu-items/{id}     -> update_menu_item (manager)
/// PATCH  /menu-items/{id}     -> patch_menu_item (manager)
/// DELETE /menu-items/{id}     -> delete_menu_item (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/menu-items",
            get(menu_items::list_menu_items).post(menu_items::create_menu_item),
        )
        .route(
            "/menu-items/{id}",
            get(menu_items::get_menu_item)
                .put(menu_items::update_menu_item)
                .patch(menu_items::patch_menu_item)
                .delete(menu_items::delete_menu_item),
        )
}
