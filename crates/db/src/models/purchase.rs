//! Video purchase ledger model and DTOs.

use boom_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::status::StatusId;
use crate::models::video::Video;

/// A row from `video_purchases`, with the status name resolved from
/// `purchase_statuses`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoPurchase {
    pub id: DbId,
    pub video_id: DbId,
    pub buyer_id: DbId,
    pub purchased_at: Timestamp,
    pub price: f64,
    pub status_id: StatusId,
    pub status: String,
    pub transaction_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A purchase joined with the video it unlocks.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseWithVideo {
    #[serde(flatten)]
    pub purchase: VideoPurchase,
    pub video: Video,
}

/// DTO for recording a purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePurchase {
    pub video_id: DbId,
    pub buyer_id: DbId,
    /// Price paid; the video's price at the time of purchase.
    pub price: f64,
    pub status_id: StatusId,
    pub transaction_id: String,
}
