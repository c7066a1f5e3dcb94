//! Repository for the `menu_items` table.
//!
//! Every read joins `categories` so rows carry `category_title`.

use lemon_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu_item::{CreateMenuItem, MenuItem, MenuItemFilter, UpdateMenuItem};

/// Joined column list; the menu item table is aliased `m`.
const COLUMNS: &str =
    "m.id, m.title, m.price, m.featured, m.category_id, c.title AS category_title";

/// Provides CRUD and filtered listing for menu items.
pub struct MenuItemRepo;

impl MenuItemRepo {
    /// Insert a new menu item, returning the created row with its category title.
    pub async fn create(pool: &PgPool, input: &CreateMenuItem) -> Result<MenuItem, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                INSERT INTO menu_items (title, price, featured, category_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT {COLUMNS} FROM m JOIN categories c ON c.id = m.category_id"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(&input.title)
            .bind(input.price)
            .bind(input.featured)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a menu item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items m
             JOIN categories c ON c.id = m.category_id
             WHERE m.id = $1"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List menu items matching `filter`, sorted and paginated.
    pub async fn list(pool: &PgPool, filter: &MenuItemFilter) -> Result<Vec<MenuItem>, sqlx::Error> {
        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.search.is_some() {
            conditions.push(format!(
                "(m.title ILIKE ${bind_idx} OR c.title ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if filter.title.is_some() {
            conditions.push(format!("m.title = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.price.is_some() {
            conditions.push(format!("m.price = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.featured.is_some() {
            conditions.push(format!("m.featured = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.category_id.is_some() {
            conditions.push(format!("m.category_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // The sort field comes from an allow-list, never from raw input.
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items m \
             JOIN categories c ON c.id = m.category_id \
             {where_clause} \
             ORDER BY m.{field} {direction}, m.id ASC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            field = filter.ordering.field,
            direction = filter.ordering.direction(),
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, MenuItem>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref pattern) = filter.search {
            q = q.bind(pattern);
        }
        if let Some(ref title) = filter.title {
            q = q.bind(title);
        }
        if let Some(price) = filter.price {
            q = q.bind(price);
        }
        if let Some(featured) = filter.featured {
            q = q.bind(featured);
        }
        if let Some(category_id) = filter.category_id {
            q = q.bind(category_id);
        }

        q = q.bind(filter.limit).bind(filter.offset);
        q.fetch_all(pool).await
    }

    /// Update a menu item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItem>, sqlx::Error> {
        let query = format!(
            "WITH m AS (
                UPDATE menu_items SET
                    title = COALESCE($2, title),
                    price = COALESCE($3, price),
                    featured = COALESCE($4, featured),
                    category_id = COALESCE($5, category_id)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM m JOIN categories c ON c.id = m.category_id"
        );
        sqlx::query_as::<_, MenuItem>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.price)
            .bind(input.featured)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a menu item by ID. Returns `true` if a row was removed.
    ///
    /// Cart lines and order items referencing it are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
