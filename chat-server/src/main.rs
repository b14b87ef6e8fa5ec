pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::Authenticated,
    messages::{
        create_message_request::CreateMessageRequest,
        list_messages_query::ListMessagesQuery,
        message_dto::MessageDto,
        message_list_response::MessageListResponse,
        message_response::MessageResponse,
        messages::{create_message, list_messages, stream_messages},
    },
};

pub use crate::routes::build_router;

use chat_auth::JwtValidator;
use chat_broadcast::{AppState, BroadcastChannel, BroadcastConfig, SqliteMessageStore};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = config::Config::from_env()?;

    // Initialize logger (before any other logging)
    logger::initialize(config.level_filter(), config.log_colored)?;

    info!("Starting chat-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    info!("Connecting to database: {}", config.database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .busy_timeout(std::time::Duration::from_secs(5)),
        )
        .await?;

    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    chat_db::run_migrations(&pool).await?;
    info!("Migrations complete");

    // Create JWT validator
    let jwt_validator = if let Some(ref secret) = config.jwt_secret {
        info!("JWT: HS256 validation enabled");
        JwtValidator::with_hs256(secret.as_bytes())
    } else if let Some(ref public_key) = config.jwt_public_key {
        info!("JWT: RS256 validation enabled");
        JwtValidator::with_rs256(public_key)?
    } else {
        unreachable!("validate() ensures a JWT secret or public key is set")
    };

    // Create broadcast channel over the message store
    let store = Arc::new(SqliteMessageStore::new(pool.clone()));
    let channel = BroadcastChannel::new(
        store,
        BroadcastConfig {
            max_subscribers: config.max_subscribers,
            send_buffer_size: config.send_buffer_size,
            catch_up_limit: config.poll_batch_limit,
        },
    );
    info!("Broadcast channel initialized");

    // Build application state
    let app_state = AppState {
        pool,
        channel,
        jwt_validator: Arc::new(jwt_validator),
        delivery: config.delivery_mode,
        stream_idle: Duration::from_secs(config.stream_idle_secs),
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let listener = TcpListener::bind(&config.bind_addr).await?;

    // Get actual bound address (important when port is 0 / auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {}", e),
            }
        })
        .await?;

    info!("Graceful shutdown complete");

    Ok(())
}
