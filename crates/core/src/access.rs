//! Access policy: which role may perform which action on which resource.
//!
//! The whole policy lives in [`permits`] so handlers never test roles
//! directly. Anonymous access (menu browsing) is decided by the route, not
//! here: this table only classifies authenticated callers.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::roles::Role;

/// API resources subject to the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Category,
    MenuItem,
    Cart,
    Order,
    GroupMembership,
}

/// Actions a caller can attempt on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

/// The single field a non-manager may change through a partial order update.
pub const ORDER_STATUS_FIELD: &str = "status";

/// Return whether `role` may perform `action` on `resource`.
pub fn permits(role: Role, resource: Resource, action: Action) -> bool {
    use Action::*;
    use Resource::*;

    match (resource, role, action) {
        (Category, _, List) => true,
        (Category, Role::Manager, _) => true,

        (MenuItem, _, List | Retrieve) => true,
        (MenuItem, Role::Manager, _) => true,

        (Cart, Role::Customer, List | Create | Destroy) => true,

        (Order, Role::Customer, List | Retrieve | Create) => true,
        (Order, Role::Delivery, List | PartialUpdate) => true,
        (Order, Role::Manager, List | PartialUpdate | Update | Destroy) => true,

        (GroupMembership, Role::Manager, List | Create | Destroy) => true,

        _ => false,
    }
}

/// Like [`permits`], but produces a `Forbidden` error on denial.
pub fn authorize(role: Role, resource: Resource, action: Action) -> Result<(), CoreError> {
    if permits(role, resource, action) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "A {role} may not perform {action:?} on {resource:?}"
        )))
    }
}

/// Enforce the partial-update field restriction on an order body.
///
/// Managers may send any fields. Everyone else must send exactly one key,
/// `status`, with a non-null value.
pub fn restrict_order_patch(role: Role, body: &Map<String, Value>) -> Result<(), CoreError> {
    if role.is_manager() {
        return Ok(());
    }

    let status_only = body.len() == 1
        && body
            .get(ORDER_STATUS_FIELD)
            .is_some_and(|value| !value.is_null());

    if status_only {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the status field may be updated".into(),
        ))
    }
}
