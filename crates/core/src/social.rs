//! Like-list manipulation.

use crate::error::CoreError;
use crate::ids::IdInput;
use crate::types::DbId;

/// Message returned when the `likes` payload is not a list of user ids.
pub const LIKES_NOT_ARRAY: &str = "Likes must be an array";

/// Turn a client-supplied `likes` value into a list of user ids.
///
/// The list replaces the stored one wholesale. Entries must be ids (numbers
/// or numeric strings); duplicates are dropped keeping first occurrence.
/// The ids are not checked against existing users.
pub fn parse_like_list(value: &serde_json::Value) -> Result<Vec<DbId>, CoreError> {
    let items = value
        .as_array()
        .ok_or_else(|| CoreError::invalid(LIKES_NOT_ARRAY))?;

    let mut likes = Vec::with_capacity(items.len());
    for item in items {
        let input: IdInput = serde_json::from_value(item.clone())
            .map_err(|_| CoreError::invalid(LIKES_NOT_ARRAY))?;
        let id = input
            .resolve("user")
            .map_err(|_| CoreError::invalid(LIKES_NOT_ARRAY))?;
        if !likes.contains(&id) {
            likes.push(id);
        }
    }
    Ok(likes)
}
