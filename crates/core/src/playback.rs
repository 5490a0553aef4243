//! Playback authorization.
//!
//! Advisory only: media URLs are part of every video payload, so this
//! decides what a client should offer (play vs. buy), not what it can fetch.

use crate::video::VideoKind;

/// Whether watching this video requires a completed purchase.
pub fn requires_purchase(kind: VideoKind, price: f64) -> bool {
    kind == VideoKind::LongForm && price > 0.0
}

/// Whether the viewer may play the video.
///
/// Short-form is always playable. Long-form is playable when free or when
/// the viewer holds a completed purchase.
pub fn can_watch(kind: VideoKind, price: f64, purchased: bool) -> bool {
    !requires_purchase(kind, price) || purchased
}
