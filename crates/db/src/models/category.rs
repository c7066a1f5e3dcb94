//! Category entity model and DTOs.

use lemon_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A category row from the `categories` table.
///
/// The slug is stored but not part of the wire representation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub slug: String,
    pub title: String,
}

/// DTO for creating a new category.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub slug: String,
    pub title: String,
}

/// DTO for updating an existing category. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub slug: Option<String>,
    pub title: Option<String>,
}
