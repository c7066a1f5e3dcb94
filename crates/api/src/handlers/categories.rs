//! Handlers for the `/categories` resource.
//!
//! Reads are open to any authenticated caller; writes require a manager.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lemon_core::access::{Action, Resource};
use lemon_core::catalog::slugify;
use lemon_core::error::CoreError;
use lemon_core::types::DbId;
use lemon_db::models::category::{Category, CreateCategory, UpdateCategory};
use lemon_db::repositories::CategoryRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    /// Derived from the title when omitted.
    #[validate(length(min = 1, max = 255))]
    pub slug: Option<String>,
}

/// Request body for `PATCH /categories/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub slug: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<Category>>> {
    auth.authorize(Resource::Category, Action::List)?;
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Category>> {
    auth.authorize(Resource::Category, Action::Retrieve)?;
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<Category>)> {
    auth.authorize(Resource::Category, Action::Create)?;
    let input: CategoryRequest = body.parse_valid()?;

    let slug = input.slug.unwrap_or_else(|| slugify(&input.title));
    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            slug,
            title: input.title,
        },
    )
    .await?;

    tracing::info!(category_id = category.id, user_id = auth.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
///
/// Full replacement: a missing slug is re-derived from the new title.
pub async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<Category>> {
    auth.authorize(Resource::Category, Action::Update)?;
    let input: CategoryRequest = body.parse_valid()?;

    let slug = input.slug.unwrap_or_else(|| slugify(&input.title));
    let update = UpdateCategory {
        slug: Some(slug),
        title: Some(input.title),
    };
    let category = CategoryRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// PATCH /api/v1/categories/{id}
pub async fn patch_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<Category>> {
    auth.authorize(Resource::Category, Action::PartialUpdate)?;
    let input: PatchCategoryRequest = body.parse_valid()?;

    let update = UpdateCategory {
        slug: input.slug,
        title: input.title,
    };
    let category = CategoryRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 400 while menu items still belong to the category.
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.authorize(Resource::Category, Action::Destroy)?;

    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
