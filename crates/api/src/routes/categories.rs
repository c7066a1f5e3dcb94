//! Route definitions for the `/categories` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Category routes (merged at the API root).
///
/// ```text
/// GET    /categories          -> list_categories
/// POST   /categories          -> create_category (manager)
/// GET    /categories/{id}     -> get_category
/// PUT    /categories/{id}     -> update_category (manager)
/// PATCH  /categories/{id}     -> patch_category (manager)
/// DELETE /categories/{id}     -> delete_category (manager)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .patch(categories::patch_category)
                .delete(categories::delete_category),
        )
}
