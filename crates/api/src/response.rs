//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "message": "..." }` body returned by endpoints that confirm an action
/// without returning a resource (group membership changes).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
