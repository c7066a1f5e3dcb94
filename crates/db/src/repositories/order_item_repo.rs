//! Repository for the `order_items` table.

use lemon_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::OrderItem;

/// Select list joining the menu item title; the order item table is aliased `oi`.
pub(crate) const SELECT_ITEMS: &str =
    "SELECT oi.id, oi.order_id, oi.menuitem_id, oi.quantity, oi.unit_price, oi.price, m.title \
     FROM order_items oi \
     JOIN menu_items m ON m.id = oi.menuitem_id";

/// Provides read access to order items. Items are only ever written as part
/// of [`OrderRepo::create_from_cart`](super::OrderRepo::create_from_cart).
pub struct OrderItemRepo;

impl OrderItemRepo {
    /// List the items of one order.
    pub async fn list_for_order(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("{SELECT_ITEMS} WHERE oi.order_id = $1 ORDER BY oi.id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// List the items of several orders in one query, ordered by order then item.
    pub async fn list_for_orders(
        pool: &PgPool,
        order_ids: &[DbId],
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("{SELECT_ITEMS} WHERE oi.order_id = ANY($1) ORDER BY oi.order_id, oi.id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_ids)
            .fetch_all(pool)
            .await
    }
}
