//! Order and order item models, DTOs, and caller scoping.

use lemon_core::roles::Role;
use lemon_core::search::Ordering;
use lemon_core::types::{Date, DbId};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// An order row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    #[serde(rename = "user")]
    pub user_id: DbId,
    #[serde(rename = "delivery_crew")]
    pub delivery_crew_id: Option<DbId>,
    /// `false` while pending, `true` once delivered.
    pub status: bool,
    pub total: Decimal,
    pub date: Date,
}

/// An order item row joined with its menu item's title.
///
/// `unit_price` and `price` are snapshots taken when the order was placed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    #[serde(rename = "order")]
    pub order_id: DbId,
    #[serde(rename = "menuitem")]
    pub menuitem_id: DbId,
    pub quantity: i16,
    pub unit_price: Decimal,
    pub price: Decimal,
    pub title: String,
}

/// Outcome of turning a cart into an order.
#[derive(Debug)]
pub enum Checkout {
    Placed { order: Order, items: Vec<OrderItem> },
    /// The cart had no lines; nothing was written.
    EmptyCart,
    /// The total does not fit the order columns; nothing was written.
    TotalTooLarge(Decimal),
}

impl Checkout {
    /// The placed order and its items, if any.
    pub fn placed(self) -> Option<(Order, Vec<OrderItem>)> {
        match self {
            Checkout::Placed { order, items } => Some((order, items)),
            _ => None,
        }
    }
}

/// DTO for updating an order. All fields are optional.
///
/// `delivery_crew_id` is doubly optional: `Some(None)` unassigns the crew.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrder {
    pub status: Option<bool>,
    pub delivery_crew_id: Option<Option<DbId>>,
}

/// Columns an order listing may be sorted by.
pub const ORDER_ORDERING_FIELDS: &[&str] = &["id", "date", "total", "status"];

/// Default order listing: newest first.
pub const DEFAULT_ORDER_ORDERING: Ordering = Ordering::desc("id");

/// Filters for listing orders.
#[derive(Debug, Clone)]
pub struct OrderFilter {
    /// Case-insensitive substring over the customer's and the delivery
    /// crew member's usernames.
    pub search: Option<String>,
    pub ordering: Ordering,
}

/// The subset of orders a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    AssignedTo(DbId),
    PlacedBy(DbId),
}

impl OrderScope {
    /// Managers see everything, delivery crew their assignments, customers
    /// their own orders.
    pub fn for_caller(role: Role, user_id: DbId) -> Self {
        match role {
            Role::Manager => OrderScope::All,
            Role::Delivery => OrderScope::AssignedTo(user_id),
            Role::Customer => OrderScope::PlacedBy(user_id),
        }
    }
}
