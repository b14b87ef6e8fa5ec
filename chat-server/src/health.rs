use chat_broadcast::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Health check with component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => "operational",
        Err(e) => {
            log::warn!("Health check database probe failed: {}", e);
            "unavailable"
        }
    };

    let status = if database == "operational" {
        "healthy"
    } else {
        "degraded"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "broadcast": "operational",
        },
        "subscribers": state.channel.registry().total_count(),
        "oldest_subscriber_connected_at": state
            .channel
            .registry()
            .oldest_connected_at()
            .map(|t| t.to_rfc3339()),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe (ready to accept traffic?)
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => (StatusCode::OK, "Ready").into_response(),
        Err(e) => {
            log::warn!("Readiness probe failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Not ready").into_response()
        }
    }
}
