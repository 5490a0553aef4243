//! Domain error type shared by every crate in the workspace.
//!
//! The API layer maps each variant onto an HTTP status; the messages carried
//! by `Validation`, `Unauthorized` and `Forbidden` are shown to the caller
//! verbatim, so keep them short and user-facing.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row does not exist (404).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or missing client input (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No usable caller identity (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is acting on somebody else's resource (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::Validation`] with a static message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}
