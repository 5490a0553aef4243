//! Chat membership rules.

use crate::error::CoreError;
use crate::types::DbId;

/// Canonical member set for a chat: the caller plus the requested users,
/// sorted and de-duplicated. At least two distinct members are required.
pub fn chat_members(caller: DbId, requested: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    let mut members: Vec<DbId> = requested.to_vec();
    members.push(caller);
    members.sort_unstable();
    members.dedup();

    if members.len() < 2 {
        return Err(CoreError::invalid("A chat needs at least two members"));
    }
    Ok(members)
}

/// Stable identifier of a member set, used to find an existing chat.
///
/// `members` must already be canonical (see [`chat_members`]).
pub fn users_hash(members: &[DbId]) -> String {
    members
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("-")
}
