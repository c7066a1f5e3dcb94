//! Repository for the `orders` table, including order placement.

use lemon_core::pricing::{fits_order_total, line_price, order_total};
use lemon_core::types::DbId;
use sqlx::PgPool;

use super::order_item_repo::SELECT_ITEMS;
use crate::models::cart::CartLineDetail;
use crate::models::order::{Checkout, Order, OrderFilter, OrderItem, OrderScope, UpdateOrder};

/// Column list for single-table statements.
const COLUMNS: &str = "id, user_id, delivery_crew_id, status, total, date";

/// Column list for statements where `orders` is aliased `o`.
const O_COLUMNS: &str = "o.id, o.user_id, o.delivery_crew_id, o.status, o.total, o.date";

/// Provides scoped reads, updates, and cart-to-order placement.
pub struct OrderRepo;

impl OrderRepo {
    /// Turn a user's cart into an order in a single transaction.
    ///
    /// Reads (and locks) the cart with current menu prices, inserts the order
    /// with the summed total, snapshots one order item per cart line, and
    /// empties the cart. An empty cart or a total too large to store leaves
    /// everything untouched. Any failure rolls back every step.
    pub async fn create_from_cart(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Checkout, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lines = sqlx::query_as::<_, CartLineDetail>(
            "SELECT c.menuitem_id, m.title, m.price AS unit_price, c.quantity
             FROM cart c
             JOIN menu_items m ON m.id = c.menuitem_id
             WHERE c.user_id = $1
             ORDER BY c.id
             FOR UPDATE OF c",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            tx.rollback().await?;
            return Ok(Checkout::EmptyCart);
        }

        let prices: Vec<_> = lines
            .iter()
            .map(|line| line_price(line.quantity, line.unit_price))
            .collect();
        let total = order_total(prices.iter().copied());
        if !fits_order_total(total) {
            tx.rollback().await?;
            return Ok(Checkout::TotalTooLarge(total));
        }

        let query = format!(
            "INSERT INTO orders (user_id, total)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .bind(total)
            .fetch_one(&mut *tx)
            .await?;

        for (line, price) in lines.iter().zip(&prices) {
            sqlx::query(
                "INSERT INTO order_items (order_id, menuitem_id, quantity, unit_price, price)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(order.id)
            .bind(line.menuitem_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(*price)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let query = format!("{SELECT_ITEMS} WHERE oi.order_id = $1 ORDER BY oi.id");
        let items = sqlx::query_as::<_, OrderItem>(&query)
            .bind(order.id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::debug!(order_id = order.id, user_id, lines = items.len(), "Order placed from cart");
        Ok(Checkout::Placed { order, items })
    }

    /// List the orders visible in `scope`, filtered and sorted.
    pub async fn list(
        pool: &PgPool,
        scope: OrderScope,
        filter: &OrderFilter,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        let scope_id = match scope {
            OrderScope::All => None,
            OrderScope::AssignedTo(id) => {
                conditions.push(format!("o.delivery_crew_id = ${bind_idx}"));
                Some(id)
            }
            OrderScope::PlacedBy(id) => {
                conditions.push(format!("o.user_id = ${bind_idx}"));
                Some(id)
            }
        };
        if scope_id.is_some() {
            bind_idx += 1;
        }

        if filter.search.is_some() {
            conditions.push(format!(
                "(u.username ILIKE ${bind_idx} OR dc.username ILIKE ${bind_idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // The sort field comes from an allow-list, never from raw input.
        let query = format!(
            "SELECT {O_COLUMNS} FROM orders o \
             JOIN users u ON u.id = o.user_id \
             LEFT JOIN users dc ON dc.id = o.delivery_crew_id \
             {where_clause} \
             ORDER BY o.{field} {direction}, o.id DESC",
            field = filter.ordering.field,
            direction = filter.ordering.direction(),
        );

        let mut q = sqlx::query_as::<_, Order>(&query);
        if let Some(id) = scope_id {
            q = q.bind(id);
        }
        if let Some(ref pattern) = filter.search {
            q = q.bind(pattern);
        }
        q.fetch_all(pool).await
    }

    /// Find an order by ID, but only if it is visible in `scope`.
    ///
    /// Out-of-scope orders are indistinguishable from missing ones.
    pub async fn find_scoped(
        pool: &PgPool,
        scope: OrderScope,
        id: DbId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let (condition, scope_id) = match scope {
            OrderScope::All => ("TRUE", None),
            OrderScope::AssignedTo(user_id) => ("delivery_crew_id = $2", Some(user_id)),
            OrderScope::PlacedBy(user_id) => ("user_id = $2", Some(user_id)),
        };
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1 AND {condition}");

        let mut q = sqlx::query_as::<_, Order>(&query).bind(id);
        if let Some(user_id) = scope_id {
            q = q.bind(user_id);
        }
        q.fetch_optional(pool).await
    }

    /// Update an order. Only non-`None` fields in `input` are applied, and the
    /// order date is refreshed.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrder,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = COALESCE($2, status),
                delivery_crew_id = CASE WHEN $3 THEN $4 ELSE delivery_crew_id END,
                date = CURRENT_DATE
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(input.status)
            .bind(input.delivery_crew_id.is_some())
            .bind(input.delivery_crew_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete an order and (by cascade) its items. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
