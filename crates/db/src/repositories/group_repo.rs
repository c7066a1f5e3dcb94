//! Repository for group rosters (`groups` + `user_groups`).

use lemon_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::GroupMember;

/// Provides membership operations on named groups.
pub struct GroupRepo;

impl GroupRepo {
    /// List the members of a group ordered by user ID.
    pub async fn list_members(pool: &PgPool, group: &str) -> Result<Vec<GroupMember>, sqlx::Error> {
        sqlx::query_as::<_, GroupMember>(
            "SELECT u.id, u.username FROM users u
             JOIN user_groups ug ON ug.user_id = u.id
             JOIN groups g ON g.id = ug.group_id
             WHERE g.name = $1
             ORDER BY u.id",
        )
        .bind(group)
        .fetch_all(pool)
        .await
    }

    /// Add a user to a group. Returns `false` if they were already a member.
    pub async fn add_member(pool: &PgPool, user_id: DbId, group: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_groups (user_id, group_id)
             SELECT $1, id FROM groups WHERE name = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(group)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a user from a group. Returns `false` if they were not a member.
    pub async fn remove_member(
        pool: &PgPool,
        user_id: DbId,
        group: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_groups
             WHERE user_id = $1
               AND group_id = (SELECT id FROM groups WHERE name = $2)",
        )
        .bind(user_id)
        .bind(group)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user belongs to a group.
    pub async fn is_member(pool: &PgPool, user_id: DbId, group: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM user_groups ug
                JOIN groups g ON g.id = ug.group_id
                WHERE ug.user_id = $1 AND g.name = $2
             )",
        )
        .bind(user_id)
        .bind(group)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
