//! Handlers for the caller's cart (`/cart/menu-items`).
//!
//! Customers only, and always the caller's own cart: the `user` is taken
//! from the token, never from the body.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lemon_core::access::{Action, Resource};
use lemon_core::error::CoreError;
use lemon_core::pricing::line_price;
use lemon_core::types::DbId;
use lemon_db::models::cart::{CartLineDetail, CreateCartLine};
use lemon_db::repositories::CartRepo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /cart/menu-items`.
///
/// Unknown fields (including a client-supplied `user`) are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartLineRequest {
    pub menuitem: DbId,
    #[validate(range(min = 1))]
    pub quantity: i16,
}

/// A cart line as presented to the customer.
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub menuitem: DbId,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i16,
    /// `quantity × unit_price`, derived on every read.
    pub price: Decimal,
}

impl From<CartLineDetail> for CartLineResponse {
    fn from(line: CartLineDetail) -> Self {
        Self {
            menuitem: line.menuitem_id,
            price: line_price(line.quantity, line.unit_price),
            title: line.title,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

/// GET /api/v1/cart/menu-items
pub async fn list_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<CartLineResponse>>> {
    auth.authorize(Resource::Cart, Action::List)?;

    let lines = CartRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(lines.into_iter().map(CartLineResponse::from).collect()))
}

/// POST /api/v1/cart/menu-items
///
/// Adding a menu item that is already in the cart is rejected; quantities
/// are never merged.
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<CartLineResponse>)> {
    auth.authorize(Resource::Cart, Action::Create)?;
    let input: AddCartLineRequest = body.parse_valid()?;

    let line = CartRepo::add(
        &state.pool,
        &CreateCartLine {
            user_id: auth.user_id,
            menuitem_id: input.menuitem,
            quantity: input.quantity,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "This menu item is already in your cart".into(),
        ))
    })?;

    Ok((StatusCode::CREATED, Json(line.into())))
}

/// DELETE /api/v1/cart/menu-items
pub async fn clear_cart(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    auth.authorize(Resource::Cart, Action::Destroy)?;

    let removed = CartRepo::clear_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, removed, "Cart cleared");

    Ok(StatusCode::NO_CONTENT)
}
