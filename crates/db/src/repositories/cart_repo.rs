//! Repository for the `cart` table.

use lemon_core::types::DbId;
use sqlx::PgPool;

use crate::models::cart::{CartLineDetail, CreateCartLine};

/// Provides per-user cart operations.
pub struct CartRepo;

impl CartRepo {
    /// List a user's cart lines with current menu titles and prices.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartLineDetail>, sqlx::Error> {
        sqlx::query_as::<_, CartLineDetail>(
            "SELECT c.menuitem_id, m.title, m.price AS unit_price, c.quantity
             FROM cart c
             JOIN menu_items m ON m.id = c.menuitem_id
             WHERE c.user_id = $1
             ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Add a line to a user's cart.
    ///
    /// Returns `None` when the user already has a line for this menu item;
    /// existing quantities are never merged.
    pub async fn add(
        pool: &PgPool,
        input: &CreateCartLine,
    ) -> Result<Option<CartLineDetail>, sqlx::Error> {
        sqlx::query_as::<_, CartLineDetail>(
            "WITH c AS (
                INSERT INTO cart (user_id, menuitem_id, quantity)
                VALUES ($1, $2, $3)
                ON CONFLICT ON CONSTRAINT uq_cart_user_menuitem DO NOTHING
                RETURNING menuitem_id, quantity
             )
             SELECT c.menuitem_id, m.title, m.price AS unit_price, c.quantity
             FROM c JOIN menu_items m ON m.id = c.menuitem_id",
        )
        .bind(input.user_id)
        .bind(input.menuitem_id)
        .bind(input.quantity)
        .fetch_optional(pool)
        .await
    }

    /// Delete every line in a user's cart. Returns the number of lines removed.
    pub async fn clear_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
