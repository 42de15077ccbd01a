//! HTTP-level integration tests for the `/watchlist` add interface.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, post_json_auth, user_token};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: accept swipe appends an entry with metadata
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_entry_records_drama_with_metadata(pool: PgPool) {
    let body = serde_json::json!({
        "drama_id": 94796,
        "title": "Crash Landing on You",
        "poster_path": "/q9fT0UAMk2YWts9jhLCviLIbsiL.jpg",
        "rating": 8.5
    });

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/watchlist",
        &user_token(1),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["drama_id"], 94796);
    assert_eq!(data["status"], "plan_to_watch");
    assert_eq!(data["title"], "Crash Landing on You");
    assert_eq!(data["rating"], 8.5);
}

// ---------------------------------------------------------------------------
// Test: accepting twice is not an error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn double_accept_updates_in_place(pool: PgPool) {
    let token = user_token(2);
    let body = serde_json::json!({ "drama_id": 65270, "title": "Signal" });

    let first = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/watchlist",
        &token,
        body,
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = body_json(first).await["data"]["id"].as_i64().unwrap();

    let again = serde_json::json!({ "drama_id": 65270, "status": "watching" });
    let second = post_json_auth(build_test_app(pool), "/api/v1/watchlist", &token, again).await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let json = body_json(second).await;
    assert_eq!(json["data"]["id"].as_i64().unwrap(), first_id);
    assert_eq!(json["data"]["status"], "watching");
    assert_eq!(json["data"]["title"], "Signal", "omitted metadata is kept");
}

// ---------------------------------------------------------------------------
// Test: boundary validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_is_rejected(pool: PgPool) {
    let body = serde_json::json!({ "drama_id": 100, "status": "binge" });
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/watchlist",
        &user_token(3),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_positive_drama_id_is_rejected(pool: PgPool) {
    let body = serde_json::json!({ "drama_id": 0 });
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/watchlist",
        &user_token(4),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_requires_authentication(pool: PgPool) {
    let body = serde_json::json!({ "drama_id": 100 });
    let response = post_json(build_test_app(pool), "/api/v1/watchlist", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
