//! Cart line model and DTOs.

use lemon_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// A cart line joined with the current title and price of its menu item.
///
/// `unit_price` is read live from `menu_items`; line prices are derived from
/// it when the line is presented or ordered.
#[derive(Debug, Clone, FromRow)]
pub struct CartLineDetail {
    pub menuitem_id: DbId,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: i16,
}

/// DTO for adding a line to a user's cart.
#[derive(Debug, Clone)]
pub struct CreateCartLine {
    pub user_id: DbId,
    pub menuitem_id: DbId,
    pub quantity: i16,
}
