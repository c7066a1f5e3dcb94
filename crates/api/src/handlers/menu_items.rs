//! Handlers for the `/menu-items` resource.
//!
//! Browsing is public (no token needed). Every write requires a manager.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lemon_core::access::{Action, Resource};
use lemon_core::catalog::validate_price;
use lemon_core::error::CoreError;
use lemon_core::types::DbId;
use lemon_db::models::menu_item::{CreateMenuItem, MenuItem, UpdateMenuItem};
use lemon_db::repositories::MenuItemRepo;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, JsonBody};
use crate::middleware::auth::AuthUser;
use crate::query::MenuItemQuery;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /menu-items` and `PUT /menu-items/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct MenuItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default)]
    pub featured: bool,
    /// Category id (write-only; responses carry `category_title`).
    pub category: DbId,
}

/// Request body for `PATCH /menu-items/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchMenuItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    pub featured: Option<bool>,
    pub category: Option<DbId>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MenuItem",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/menu-items
///
/// Supports `search`, `title`, `price`, `featured`, `category`, `ordering`,
/// `limit` and `offset`.
pub async fn list_menu_items(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<MenuItemQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = MenuItemRepo::list(&state.pool, &params.into_filter()).await?;
    Ok(Json(items))
}

/// GET /api/v1/menu-items/{id}
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MenuItem>> {
    let item = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/v1/menu-items
///
/// An unknown `category` is rejected with 400 by the foreign key.
pub async fn create_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    auth.authorize(Resource::MenuItem, Action::Create)?;
    let input: MenuItemRequest = body.parse_valid()?;

    let item = MenuItemRepo::create(
        &state.pool,
        &CreateMenuItem {
            title: input.title,
            price: input.price,
            featured: input.featured,
            category_id: input.category,
        },
    )
    .await?;

    tracing::info!(menu_item_id = item.id, user_id = auth.user_id, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/menu-items/{id}
pub async fn update_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<MenuItem>> {
    auth.authorize(Resource::MenuItem, Action::Update)?;
    let input: MenuItemRequest = body.parse_valid()?;

    let update = UpdateMenuItem {
        title: Some(input.title),
        price: Some(input.price),
        featured: Some(input.featured),
        category_id: Some(input.category),
    };
    let item = MenuItemRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// PATCH /api/v1/menu-items/{id}
pub async fn patch_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<MenuItem>> {
    auth.authorize(Resource::MenuItem, Action::PartialUpdate)?;
    let input: PatchMenuItemRequest = body.parse_valid()?;

    let update = UpdateMenuItem {
        title: input.title,
        price: input.price,
        featured: input.featured,
        category_id: input.category,
    };
    let item = MenuItemRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// DELETE /api/v1/menu-items/{id}
pub async fn delete_menu_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.authorize(Resource::MenuItem, Action::Destroy)?;

    if MenuItemRepo::delete(&state.pool, id).await? {
        tracing::info!(menu_item_id = id, user_id = auth.user_id, "Menu item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
