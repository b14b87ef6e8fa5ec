use crate::build_router;
use crate::tests::common::{bearer_token, create_test_state, create_test_user};

use chat_broadcast::DeliveryMode;
use chat_core::{Role, User};

use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

fn post_message(auth: &str, content: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/messages")
        .header("authorization", auth)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "content": content })).unwrap(),
        ))
        .unwrap()
}

fn get_messages(auth: &str, since: Option<&str>) -> Request<Body> {
    let uri = match since {
        Some(cursor) => format!("/api/v1/messages?since={cursor}"),
        None => "/api/v1/messages".to_string(),
    };

    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_post_without_token_returns_401() {
    let state = create_test_state().await;
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/messages")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&json!({ "content": "hello" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_post_message_returns_stored_message() {
    let state = create_test_state().await;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let app = build_router(state);

    let response = app
        .oneshot(post_message(&bearer_token(&user), "  hello class  "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["message"]["content"], "hello class");
    assert_eq!(json["message"]["author_name"], "alice");
    assert_eq!(json["message"]["group"], "student");
    assert!(json["message"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_post_empty_content_returns_400() {
    let state = create_test_state().await;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let app = build_router(state);

    let response = app
        .oneshot(post_message(&bearer_token(&user), "   "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "content");
}

#[tokio::test]
async fn test_post_from_vanished_user_returns_404() {
    let state = create_test_state().await;
    let ghost = User::new("ghost@example.com".into(), "ghost".into(), Role::Student);
    let app = build_router(state);

    let response = app
        .oneshot(post_message(&bearer_token(&ghost), "hello"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_poll_returns_messages_in_order() {
    let state = create_test_state().await;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let auth = bearer_token(&user);
    let app = build_router(state);

    for content in ["first", "second", "third"] {
        let response = app
            .clone()
            .oneshot(post_message(&auth, content))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.oneshot(get_messages(&auth, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    let messages = json["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["content"], "first");
    assert_eq!(messages[1]["content"], "second");
    assert_eq!(messages[2]["content"], "third");

    // Ids strictly increase in publish order
    assert!(messages[0]["id"].as_i64().unwrap() < messages[1]["id"].as_i64().unwrap());
    assert!(messages[1]["id"].as_i64().unwrap() < messages[2]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_poll_with_cursor_skips_seen_messages() {
    let state = create_test_state().await;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let auth = bearer_token(&user);
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(post_message(&auth, "old"))
        .await
        .unwrap();
    let first = json_body(response).await;
    let cursor = first["message"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_message(&auth, "new"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_messages(&auth, Some(&cursor.to_string())))
        .await
        .unwrap();
    let json = json_body(response).await;
    let messages = json["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["content"], "new");
}

#[tokio::test]
async fn test_poll_with_invalid_cursor_returns_400() {
    let state = create_test_state().await;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let auth = bearer_token(&user);
    let app = build_router(state);

    let response = app
        .oneshot(get_messages(&auth, Some("not-a-number")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["error"]["field"], "since");
}

#[tokio::test]
async fn test_groups_are_isolated() {
    let state = create_test_state().await;
    let student = create_test_user(&state.pool, "alice", Role::Student).await;
    let teacher = create_test_user(&state.pool, "carol", Role::Teacher).await;
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(post_message(&bearer_token(&teacher), "staff only"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_messages(&bearer_token(&student), None))
        .await
        .unwrap();
    let json = json_body(response).await;

    assert_eq!(json["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stream_route_absent_in_polling_mode() {
    let state = create_test_state().await;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let auth = bearer_token(&user);
    assert_eq!(state.delivery, DeliveryMode::Polling);
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/messages/stream")
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stream_route_mounted_in_stream_mode() {
    let mut state = create_test_state().await;
    state.delivery = DeliveryMode::Stream;
    let user = create_test_user(&state.pool, "alice", Role::Student).await;
    let auth = bearer_token(&user);
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/messages/stream")
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/event-stream"),
    );
}

#[tokio::test]
async fn test_health_reports_subscriber_state() {
    let state = create_test_state().await;
    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["subscribers"], 0);
    assert!(json["oldest_subscriber_connected_at"].is_null());
}

#[tokio::test]
async fn test_health_endpoints() {
    let state = create_test_state().await;
    let app = build_router(state);

    for uri in ["/health", "/live", "/ready"] {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri} should be OK");
    }
}
