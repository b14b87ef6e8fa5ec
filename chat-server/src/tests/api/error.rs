use crate::ApiError;

use chat_broadcast::BroadcastError;
use chat_core::CoreError;

use std::panic::Location;
use std::str::FromStr;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let error = ApiError::NotFound {
        message: "User not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "Content too long".into(),
        field: Some("content".into()),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "content");
}

#[tokio::test]
async fn test_unauthorized_returns_401() {
    let error = ApiError::Unauthorized {
        message: "Invalid or expired token".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_subscriber_limit_converts_to_503() {
    let error: ApiError = BroadcastError::SubscriberLimitExceeded {
        current: 10_000,
        max: 10_000,
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
}

#[test]
fn test_invalid_cursor_converts_to_validation_on_since() {
    let core_err = chat_core::Cursor::from_str("not-a-cursor").unwrap_err();
    assert!(matches!(core_err, CoreError::InvalidCursor { .. }));

    let api_err: ApiError = core_err.into();

    match api_err {
        ApiError::Validation { field, .. } => {
            assert_eq!(field.as_deref(), Some("since"));
        }
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_store_error_hides_internal_details() {
    let error: ApiError = BroadcastError::Store {
        message: "disk I/O error at offset 4096".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    match error {
        ApiError::Internal { message, .. } => {
            assert!(!message.contains("disk I/O"));
        }
        _ => panic!("Expected Internal error"),
    }
}
