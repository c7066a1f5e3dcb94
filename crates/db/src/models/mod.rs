//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row (plus joined
//!   read models where a response needs columns from another table)
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches

pub mod cart;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod user;
