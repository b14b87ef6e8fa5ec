use chat_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BroadcastError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Store error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },

    #[error("Subscriber limit exceeded: {current} subscribers (max: {max}) {location}")]
    SubscriberLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },
}

impl From<chat_core::CoreError> for BroadcastError {
    #[track_caller]
    fn from(e: chat_core::CoreError) -> Self {
        match e {
            chat_core::CoreError::Validation { message, field, .. } => Self::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            other => Self::Validation {
                message: other.to_string(),
                field: None,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<DbError> for BroadcastError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::UserNotFound { user_id, .. } => Self::NotFound {
                message: format!("User {} not found", user_id),
                location: ErrorLocation::from(Location::caller()),
            },
            other => Self::Store {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, BroadcastError>;
