//! Bodies returned by mutating endpoints.

use serde::{Deserialize, Serialize};

/// Human-readable outcome of an update or delete.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Status text for display.
    #[schema(example = "student updated")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outcome of a create, with the new record's id.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    /// New primary key.
    #[schema(example = 12)]
    pub id: i32,
    /// Status text for display.
    #[schema(example = "student created")]
    pub message: String,
}
