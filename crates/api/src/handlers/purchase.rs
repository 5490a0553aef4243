//! Handlers for the purchase gate.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use boom_core::error::CoreError;
use boom_core::ids::{parse_id, require_id, IdInput};
use boom_core::purchase::{check_purchasable, generate_transaction_id, ALREADY_PURCHASED};
use boom_db::models::purchase::{CreatePurchase, PurchaseWithVideo, VideoPurchase};
use boom_db::models::status::PurchaseStatus;
use boom_db::repositories::PurchaseRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::video::find_video;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /videos/purchase`.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    #[serde(rename = "videoId")]
    pub video_id: Option<IdInput>,
    /// Optional; when present it must name the caller.
    #[serde(rename = "userId")]
    pub user_id: Option<IdInput>,
}

/// Response body for the purchase-status lookup.
#[derive(Debug, Serialize)]
pub struct PurchaseStatusResponse {
    pub purchase: Option<VideoPurchase>,
    pub purchased: bool,
}

/// POST /api/v1/videos/purchase
///
/// Records a completed purchase of a priced long-form video at its current
/// price. The duplicate check is a read before the insert, so two racing
/// requests may both succeed.
pub async fn purchase(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<PurchaseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<PurchaseWithVideo>>)> {
    if let Some(buyer) = &input.user_id {
        if buyer.resolve("user").ok() != Some(user.user_id) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Cannot purchase for another user".into(),
            )));
        }
    }

    let video_id = require_id(input.video_id.as_ref(), "video")?;
    let video = find_video(&state.pool, video_id).await?;
    check_purchasable(video.kind()?, video.price)?;

    if PurchaseRepo::find_completed(&state.pool, user.user_id, video_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::invalid(ALREADY_PURCHASED)));
    }

    let purchase = PurchaseRepo::create(
        &state.pool,
        &CreatePurchase {
            video_id,
            buyer_id: user.user_id,
            price: video.price,
            status_id: PurchaseStatus::Completed.id(),
            transaction_id: generate_transaction_id(),
        },
    )
    .await?;

    tracing::info!(
        purchase_id = purchase.id,
        video_id,
        user_id = user.user_id,
        price = purchase.price,
        transaction_id = %purchase.transaction_id,
        "Video purchased",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PurchaseWithVideo { purchase, video },
        }),
    ))
}

/// GET /api/v1/videos/purchases/{user_id}/{video_id}
///
/// Whether the user holds a completed purchase of the video.
pub async fn check(
    State(state): State<AppState>,
    Path((user_id, video_id)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<PurchaseStatusResponse>>> {
    let user_id = parse_id(&user_id, "user")?;
    let video_id = parse_id(&video_id, "video")?;

    let purchase = PurchaseRepo::find_completed(&state.pool, user_id, video_id).await?;
    let purchased = purchase.is_some();

    Ok(Json(DataResponse {
        data: PurchaseStatusResponse {
            purchase,
            purchased,
        },
    }))
}
