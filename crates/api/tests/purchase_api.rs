//! HTTP-level tests for the purchase gate and playback authorization.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_long_form, create_short_form, create_user, get, get_auth,
    post_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Purchase
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_priced_long_form(pool: PgPool) {
    let (creator, _) = create_user(&pool, "creator").await;
    let (buyer, token) = create_user(&pool, "buyer").await;
    let video = create_long_form(&pool, creator.id, 4.99).await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/videos/purchase",
        json!({ "videoId": video.id.to_string(), "userId": buyer.id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let purchase = &json["data"];
    assert_eq!(purchase["buyer_id"], buyer.id);
    assert_eq!(purchase["video_id"], video.id);
    assert_eq!(purchase["price"], 4.99);
    assert_eq!(purchase["status"], "completed");
    assert_eq!(purchase["video"]["id"], video.id);
    let txn = purchase["transaction_id"].as_str().unwrap();
    assert!(txn.starts_with("TXN_"), "unexpected transaction id {txn}");

    // Second attempt is rejected by the duplicate check.
    let response = post_json_auth(
        app,
        "/api/v1/videos/purchase",
        json!({ "videoId": video.id }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Video already purchased");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_rejections(pool: PgPool) {
    let (creator, token) = create_user(&pool, "creator").await;
    let short = create_short_form(&pool, creator.id).await;
    let free = create_long_form(&pool, creator.id, 0.0).await;
    let app = build_test_app(pool);

    let cases = [
        (json!({ "videoId": short.id }), StatusCode::BAD_REQUEST, "Only Long-Form videos can be purchased"),
        (json!({ "videoId": free.id }), StatusCode::BAD_REQUEST, "Video is free, no purchase required"),
        (json!({ "videoId": 999_999 }), StatusCode::NOT_FOUND, "Video with id 999999 not found"),
    ];

    for (body, status, message) in cases {
        let response =
            post_json_auth(app.clone(), "/api/v1/videos/purchase", body, &token).await;
        assert_eq!(response.status(), status);
        assert_eq!(body_json(response).await["error"], message);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_status_lookup(pool: PgPool) {
    let (creator, _) = create_user(&pool, "creator").await;
    let (buyer, token) = create_user(&pool, "buyer").await;
    let video = create_long_form(&pool, creator.id, 2.0).await;
    let app = build_test_app(pool);
    let uri = format!("/api/v1/videos/purchases/{}/{}", buyer.id, video.id);

    let json = body_json(get(app.clone(), &uri).await).await;
    assert_eq!(json["data"]["purchased"], false);
    assert_eq!(json["data"]["purchase"], serde_json::Value::Null);

    post_json_auth(
        app.clone(),
        "/api/v1/videos/purchase",
        json!({ "videoId": video.id }),
        &token,
    )
    .await;

    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["data"]["purchased"], true);
    assert_eq!(json["data"]["purchase"]["buyer_id"], buyer.id);
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_playback_gate(pool: PgPool) {
    let (creator, _) = create_user(&pool, "creator").await;
    let (viewer, token) = create_user(&pool, "viewer").await;
    let short = create_short_form(&pool, creator.id).await;
    let free = create_long_form(&pool, creator.id, 0.0).await;
    let paid = create_long_form(&pool, creator.id, 7.5).await;
    let app = build_test_app(pool);

    let playback = |id: i64| format!("/api/v1/videos/{id}/playback");

    let json = body_json(get(app.clone(), &playback(short.id)).await).await;
    assert_eq!(json["data"]["can_watch"], true);
    assert_eq!(json["data"]["requires_purchase"], false);

    let json = body_json(get(app.clone(), &playback(free.id)).await).await;
    assert_eq!(json["data"]["can_watch"], true);

    // Anonymous and not-yet-purchased viewers are both gated.
    let json = body_json(get(app.clone(), &playback(paid.id)).await).await;
    assert_eq!(json["data"]["requires_purchase"], true);
    assert_eq!(json["data"]["can_watch"], false);

    let json = body_json(get_auth(app.clone(), &playback(paid.id), &token).await).await;
    assert_eq!(json["data"]["can_watch"], false);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/videos/purchase",
        json!({ "videoId": paid.id, "userId": viewer.id.to_string() }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(app.clone(), &playback(paid.id), &token).await).await;
    assert_eq!(json["data"]["purchased"], true);
    assert_eq!(json["data"]["can_watch"], true);

    let response = get(app, &playback(999_999)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
