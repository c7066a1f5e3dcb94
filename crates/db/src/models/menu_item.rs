//! Menu item entity model and DTOs.

use lemon_core::search::Ordering;
use lemon_core::types::DbId;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A menu item row joined with its category's title.
///
/// `category_id` is write-only on the wire; clients see `category_title`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MenuItem {
    pub id: DbId,
    pub title: String,
    pub price: Decimal,
    pub featured: bool,
    #[serde(skip_serializing)]
    pub category_id: DbId,
    pub category_title: String,
}

/// DTO for creating a new menu item.
#[derive(Debug, Clone)]
pub struct CreateMenuItem {
    pub title: String,
    pub price: Decimal,
    pub featured: bool,
    pub category_id: DbId,
}

/// DTO for updating an existing menu item. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateMenuItem {
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub featured: Option<bool>,
    pub category_id: Option<DbId>,
}

/// Columns a menu listing may be sorted by.
pub const MENU_ITEM_ORDERING_FIELDS: &[&str] = &["id", "title", "price"];

/// Default menu listing order.
pub const DEFAULT_MENU_ITEM_ORDERING: Ordering = Ordering::asc("id");

/// Filters for listing menu items. `None` fields are not applied.
#[derive(Debug, Clone)]
pub struct MenuItemFilter {
    /// Case-insensitive substring over item and category titles.
    pub search: Option<String>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub featured: Option<bool>,
    pub category_id: Option<DbId>,
    pub ordering: Ordering,
    pub limit: i64,
    pub offset: i64,
}
