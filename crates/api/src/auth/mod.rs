//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing, verification, and validation.
//! - [`jwt`] -- JWT access-token generation and validation.

pub mod jwt;
pub mod password;
