//! Domain logic for the Little Lemon ordering API.
//!
//! Pure functions and types only; persistence lives in `lemon-db` and HTTP
//! concerns in `lemon-api`.

pub mod access;
pub mod catalog;
pub mod error;
pub mod pricing;
pub mod roles;
pub mod search;
pub mod types;
