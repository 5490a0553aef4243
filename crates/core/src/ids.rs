//! Identifier parsing for path segments and JSON bodies.
//!
//! Clients address rows by opaque ids that arrive as strings (path segments,
//! form fields) or as JSON numbers. Anything that is not a positive integer
//! is rejected with `Invalid <label> ID` before any database access.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Parse a raw identifier, rejecting anything that is not a positive integer.
///
/// `label` names the entity in the error message, e.g. `"video"` produces
/// `"Invalid video ID"`.
pub fn parse_id(raw: &str, label: &str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("Invalid {label} ID"))),
    }
}

/// An identifier as it appears in a JSON body: either a number or a string.
///
/// Any other JSON value still deserializes (as `Other`) so the handler can
/// answer with the usual `Invalid <label> ID` instead of a body rejection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl IdInput {
    /// Resolve to a database id, applying the same rules as [`parse_id`].
    pub fn resolve(&self, label: &str) -> Result<DbId, CoreError> {
        match self {
            IdInput::Number(n) if *n > 0 => Ok(*n),
            IdInput::Text(s) => parse_id(s, label),
            IdInput::Number(_) | IdInput::Other(_) => {
                Err(CoreError::Validation(format!("Invalid {label} ID")))
            }
        }
    }
}

/// Resolve an optional body id, treating absence as invalid.
pub fn require_id(input: Option<&IdInput>, label: &str) -> Result<DbId, CoreError> {
    input
        .ok_or_else(|| CoreError::Validation(format!("Invalid {label} ID")))?
        .resolve(label)
}
