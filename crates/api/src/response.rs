//! Success envelopes. Errors have their own shape, see [`crate::error`].

use serde::Serialize;

/// `{ "data": T }`, the body of every successful API response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload of endpoints that only acknowledge, e.g. deleting a save.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
