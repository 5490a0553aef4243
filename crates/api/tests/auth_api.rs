//! HTTP-level tests for registration and login.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, post_json_auth};
use serde_json::json;
use sqlx::PgPool;

fn registration(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "name": "Test User",
        "email": email,
        "password": "correct horse battery",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_issues_usable_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        registration("creator", "Creator@Example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["username"], "creator");
    assert!(json["data"]["expires_in"].as_i64().unwrap() > 0);
    let token = json["data"]["access_token"].as_str().unwrap().to_string();

    // The token authenticates a protected route.
    let response = post_json_auth(
        app,
        "/api/v1/videos/save",
        json!({ "video": 999_999 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/register",
        registration("first", "same@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        registration("second", "SAME@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_matches!(json["error"].as_str(), Some(msg) if msg.ends_with("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_rejects_invalid_input(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({
            "username": "x",
            "name": "Test User",
            "email": "not-an-email",
            "password": "short",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("Username must be 2-50 characters"));
    assert!(message.contains("Email must be a valid address"));
    assert!(message.contains("Password must be at least 8 characters long"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login(pool: PgPool) {
    let app = build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/auth/register",
        registration("viewer", "viewer@example.com"),
    )
    .await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": " Viewer@example.com ", "password": "correct horse battery" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["username"], "viewer");
    assert!(json["data"]["access_token"].is_string());

    for (email, password) in [
        ("viewer@example.com", "wrong password"),
        ("nobody@example.com", "correct horse battery"),
    ] {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": email, "password": password }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid email or password");
    }
}
