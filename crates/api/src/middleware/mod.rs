//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer
//!   token and resolves their role.
//! - [`rbac`] -- Applies the access policy to an [`auth::AuthUser`].

pub mod auth;
pub mod rbac;
