//! Repository for the `video_purchases` ledger.

use boom_core::types::DbId;
use sqlx::PgPool;

use crate::models::purchase::{CreatePurchase, VideoPurchase};
use crate::models::status::PurchaseStatus;

/// Column list for purchases joined with `purchase_statuses` (aliased `s`).
const COLUMNS: &str = "p.id, p.video_id, p.buyer_id, p.purchased_at, p.price, p.status_id, \
    s.name AS status, p.transaction_id, p.created_at, p.updated_at";

/// Provides insert and lookup for purchase records.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Record a purchase and return it with its status name resolved.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePurchase,
    ) -> Result<VideoPurchase, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                 INSERT INTO video_purchases (video_id, buyer_id, price, status_id, transaction_id)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING *
             )
             SELECT {COLUMNS} FROM p
             JOIN purchase_statuses s ON s.id = p.status_id"
        );
        sqlx::query_as::<_, VideoPurchase>(&query)
            .bind(input.video_id)
            .bind(input.buyer_id)
            .bind(input.price)
            .bind(input.status_id)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// The most recent completed purchase of `video_id` by `buyer_id`, if any.
    pub async fn find_completed(
        pool: &PgPool,
        buyer_id: DbId,
        video_id: DbId,
    ) -> Result<Option<VideoPurchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_purchases p
             JOIN purchase_statuses s ON s.id = p.status_id
             WHERE p.buyer_id = $1 AND p.video_id = $2 AND p.status_id = $3
             ORDER BY p.purchased_at DESC, p.id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, VideoPurchase>(&query)
            .bind(buyer_id)
            .bind(video_id)
            .bind(PurchaseStatus::Completed.id())
            .fetch_optional(pool)
            .await
    }
}
