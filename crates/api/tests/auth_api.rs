//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover registration, duplicate usernames, login, the `/me` profile,
//! and password changes.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, put_json_auth};
use sqlx::PgPool;
use wom_api::auth::jwt::validate_token;
use wom_db::repositories::UserRepo;

/// Registration with a fresh username returns 201 and a token decodable to
/// that username.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "mindful", "password": "strong_password_1" });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    let token = json["token"].as_str().expect("response must contain token");
    let claims = validate_token(token, &common::test_config().jwt)
        .expect("token must validate with the server secret");
    assert_eq!(claims.username, "mindful");
    assert_eq!(claims.sub, json["user"]["id"].as_i64().unwrap());
    assert_eq!(json["user"]["username"], "mindful");
    assert!(
        json["user"].get("password_hash").is_none(),
        "the password hash must never be serialized"
    );
}

/// Registering twice with the same username fails with 409 and no second
/// row is created.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    let body = serde_json::json!({ "username": "dupe", "password": "strong_password_1" });

    let app = common::build_test_app(pool.clone());
    let first = post_json(app, "/api/auth/register", body.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let second = post_json(app, "/api/auth/register", body).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let count = UserRepo::count_by_username(&pool, "dupe").await.unwrap();
    assert_eq!(count, 1, "no second row may be created");
}

/// Registration rejects weak passwords and short usernames with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": "ok_name", "password": "short" });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "ab", "password": "strong_password_1" });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Login succeeds with the right password and fails 401 with the wrong one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login(pool: PgPool) {
    common::register_user(&pool, "loginuser").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": "loginuser", "password": "test_password_123!" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "loginuser", "password": "wrong" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with an unknown username returns the same 401 as a bad password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "ghost", "password": "whatever_1" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// `/me` requires a token and returns the caller's profile.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me(pool: PgPool) {
    let (token, user_id) = common::register_user(&pool, "profileuser").await;

    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user_id);
    assert_eq!(json["username"], "profileuser");
}

/// A garbage bearer token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/me", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Password change requires the current password and takes effect
/// immediately.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password(pool: PgPool) {
    let (token, _) = common::register_user(&pool, "rotator").await;

    // Wrong current password -> 401.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": "nope",
        "new_password": "next_password_456!"
    });
    let response = put_json_auth(app, "/api/auth/change-password", body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct current password -> 204.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "current_password": "test_password_123!",
        "new_password": "next_password_456!"
    });
    let response = put_json_auth(app, "/api/auth/change-password", body, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works, the new one does.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "username": "rotator", "password": "test_password_123!" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "rotator", "password": "next_password_456!" });
    let response = post_json(app, "/api/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}
