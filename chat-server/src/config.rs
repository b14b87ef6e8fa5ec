use crate::error::{Result as ServerErrorResult, ServerError};

use chat_broadcast::DeliveryMode;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// SQLite database file (default: chat.sqlite)
    pub database_path: PathBuf,

    /// JWT secret for HS256 validation
    pub jwt_secret: Option<String>,

    /// JWT public key for RS256 validation (PEM format)
    pub jwt_public_key: Option<String>,

    /// Read-side delivery strategy (default: polling)
    pub delivery_mode: DeliveryMode,

    /// Maximum registered subscribers (default: 10000)
    pub max_subscribers: usize,

    /// Per-subscriber delivery queue depth (default: 100)
    pub send_buffer_size: usize,

    /// Maximum messages per catch-up query (default: 500)
    pub poll_batch_limit: i64,

    /// Idle seconds before a streaming connection is dropped (default: 60)
    pub stream_idle_secs: u64,

    /// Log level (default: info)
    pub log_level: String,

    /// Enable colored logs (default: true)
    pub log_colored: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ServerErrorResult<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|source| ServerError::InvalidBindAddr { source })?;

        let delivery_mode = match std::env::var("DELIVERY_MODE") {
            Ok(value) => DeliveryMode::from_str(&value)
                .map_err(|message| ServerError::InvalidDeliveryMode { message })?,
            Err(_) => DeliveryMode::Polling,
        };

        let config = Self {
            bind_addr,

            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "chat.sqlite".to_string())
                .into(),

            jwt_secret: std::env::var("JWT_SECRET").ok(),
            jwt_public_key: std::env::var("JWT_PUBLIC_KEY").ok(),

            delivery_mode,

            max_subscribers: std::env::var("MAX_SUBSCRIBERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10_000),

            send_buffer_size: std::env::var("SEND_BUFFER_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),

            poll_batch_limit: std::env::var("POLL_BATCH_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),

            stream_idle_secs: std::env::var("STREAM_IDLE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),

            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            log_colored: std::env::var("LOG_COLORED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> ServerErrorResult<()> {
        if self.jwt_secret.is_none() && self.jwt_public_key.is_none() {
            return Err(ServerError::MissingJwtConfig);
        }

        if self.jwt_secret.is_some() && self.jwt_public_key.is_some() {
            log::warn!("Both JWT_SECRET and JWT_PUBLIC_KEY provided, using JWT_SECRET (HS256)");
        }

        LevelFilter::from_str(&self.log_level).map_err(|_| ServerError::InvalidLogLevel {
            value: self.log_level.clone(),
        })?;

        Ok(())
    }

    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub fn log_summary(&self) {
        log::info!(
            "Config: bind={}, db={}, delivery={}, max_subscribers={}, buffer={}, batch={}, stream_idle={}s",
            self.bind_addr,
            self.database_path.display(),
            self.delivery_mode,
            self.max_subscribers,
            self.send_buffer_size,
            self.poll_batch_limit,
            self.stream_idle_secs,
        );
    }
}
