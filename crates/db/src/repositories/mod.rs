//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod cart_repo;
pub mod category_repo;
pub mod group_repo;
pub mod menu_item_repo;
pub mod order_item_repo;
pub mod order_repo;
pub mod user_repo;

pub use cart_repo::CartRepo;
pub use category_repo::CategoryRepo;
pub use group_repo::GroupRepo;
pub use menu_item_repo::MenuItemRepo;
pub use order_item_repo::OrderItemRepo;
pub use order_repo::OrderRepo;
pub use user_repo::UserRepo;
