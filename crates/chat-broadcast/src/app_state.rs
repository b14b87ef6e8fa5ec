use crate::{BroadcastChannel, DeliveryMode};

use chat_auth::JwtValidator;

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

/// Shared application state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub channel: BroadcastChannel,
    pub jwt_validator: Arc<JwtValidator>,
    pub delivery: DeliveryMode,
    /// Streaming connections with no data for this long are dropped.
    pub stream_idle: Duration,
}
