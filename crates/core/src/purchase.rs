//! Purchase gate rules and transaction id generation.
//!
//! There is no payment processor: a purchase that passes [`check_purchasable`]
//! and the duplicate check is recorded as completed straight away.

use rand::Rng;

use crate::error::CoreError;
use crate::video::VideoKind;

/// Error message for a second completed purchase of the same video.
pub const ALREADY_PURCHASED: &str = "Video already purchased";

/// Prefix of every generated transaction id.
pub const TRANSACTION_PREFIX: &str = "TXN_";

/// Length of the random suffix of a transaction id.
const TRANSACTION_SUFFIX_LEN: usize = 7;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Reject videos that cannot be bought: short-form and free long-form.
pub fn check_purchasable(kind: VideoKind, price: f64) -> Result<(), CoreError> {
    if kind != VideoKind::LongForm {
        return Err(CoreError::invalid("Only Long-Form videos can be purchased"));
    }
    if price <= 0.0 {
        return Err(CoreError::invalid("Video is free, no purchase required"));
    }
    Ok(())
}

/// Generate a transaction id of the form `TXN_<unix millis>_<7 base36 chars>`.
pub fn generate_transaction_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..TRANSACTION_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{TRANSACTION_PREFIX}{millis}_{suffix}")
}
