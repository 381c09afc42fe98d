//! How handler failures reach the client.
//!
//! Variant mapping is checked by calling `IntoResponse` directly; database
//! constraint mapping is checked end to end through the router.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, post_json};
use http_body_util::BodyExt;
use placement_api::error::AppError;
use placement_core::error::CoreError;
use sqlx::PgPool;

/// Convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Variant mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_location_renders_404_with_entity_name() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Location",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Location with id 42 not found");
}

#[tokio::test]
async fn blank_name_renders_validation_error() {
    let err = AppError::Core(CoreError::Validation("name must not be empty".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "name must not be empty");
}

#[tokio::test]
async fn taken_name_renders_conflict() {
    let err = AppError::Core(CoreError::Conflict(
        "Location named \"Ward 5\" already exists".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Constraint mapping through the router
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_student_number_returns_409(pool: PgPool) {
    let body = serde_json::json!({"name": "Alice", "student_number": 22001234});
    common::create_id(&pool, "/api/v1/students", body.clone()).await;

    let response = post_json(common::build_test_app(pool), "/api/v1/students", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_foreign_key_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/activity-logs",
        serde_json::json!({
            "student_id": 1,
            "location_id": 1,
            "supervisor_id": 1,
            "activity_id": 1,
            "domain_id": 1,
            "minutes_spent": 30,
            "record_date": "2023-03-01"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_REFERENCE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_is_rejected(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/locations",
        serde_json::json!({"title": "missing name field"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
