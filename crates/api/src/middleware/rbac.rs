//! Role-based access control on top of [`AuthUser`].
//!
//! Handlers state the resource and action they implement; the decision
//! itself comes from the single policy table in `lemon_core::access`.

use lemon_core::access::{self, Action, Resource};

use super::auth::AuthUser;
use crate::error::AppError;

impl AuthUser {
    /// Reject with 403 Forbidden unless the caller's role may perform
    /// `action` on `resource`.
    ///
    /// ```ignore
    /// async fn delete_order(user: AuthUser, ...) -> AppResult<StatusCode> {
    ///     user.authorize(Resource::Order, Action::Destroy)?;
    ///     ...
    /// }
    /// ```
    pub fn authorize(&self, resource: Resource, action: Action) -> Result<(), AppError> {
        access::authorize(self.role, resource, action).map_err(|err| {
            tracing::debug!(
                user_id = self.user_id,
                role = %self.role,
                ?resource,
                ?action,
                "Access denied"
            );
            AppError::Core(err)
        })
    }
}
