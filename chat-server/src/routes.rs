use crate::api::messages::messages::{create_message, list_messages, stream_messages};
use crate::health;

use chat_broadcast::{AppState, DeliveryMode};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Message endpoints
        .route("/api/v1/messages", post(create_message).get(list_messages))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check));

    // The streaming read path is only mounted when the deployment opted
    // into stream delivery
    if state.delivery == DeliveryMode::Stream {
        router = router.route("/api/v1/messages/stream", get(stream_messages));
    }

    router
        // Add shared state
        .with_state(state)
        // CORS middleware (allow all origins, the browser client polls
        // from a different port in development)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
