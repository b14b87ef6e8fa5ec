//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes.

use chat_auth::AuthError;
use chat_broadcast::BroadcastError;
use chat_core::CoreError;
use chat_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Validation error (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Missing or invalid credentials (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Too many subscribers (503)
    #[error("Service unavailable: {message} {location}")]
    ServiceUnavailable {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log the error with location for debugging
        log::error!("{}", self);

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::Unauthorized { message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::ServiceUnavailable { message, .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiErrorBody {
                    code: "SERVICE_UNAVAILABLE".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert broadcast channel errors to API errors
impl From<BroadcastError> for ApiError {
    #[track_caller]
    fn from(e: BroadcastError) -> Self {
        match e {
            BroadcastError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            BroadcastError::NotFound { message, .. } => ApiError::NotFound {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            BroadcastError::SubscriberLimitExceeded { current, max, .. } => {
                ApiError::ServiceUnavailable {
                    message: format!("Subscriber limit reached ({current}/{max})"),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
            BroadcastError::Store { .. } => {
                // Don't expose internal store details to clients
                log::error!("Store error: {}", e);
                ApiError::Internal {
                    message: "Store operation failed".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Database error: {}", e);

        match e {
            DbError::UserNotFound { user_id, .. } => ApiError::NotFound {
                message: format!("User {} not found", user_id),
                location: ErrorLocation::from(Location::caller()),
            },
            DbError::Sqlx {
                source: sqlx::Error::RowNotFound,
                ..
            } => ApiError::NotFound {
                message: "Resource not found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => ApiError::Internal {
                message: "Database operation failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert core validation errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::InvalidCursor { value, .. } => ApiError::Validation {
                message: format!("Invalid cursor: {}", value),
                field: Some("since".to_string()),
                location: ErrorLocation::from(Location::caller()),
            },
            other => ApiError::Validation {
                message: other.to_string(),
                field: None,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

/// Convert auth errors to API errors
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        log::warn!("Authentication failed: {}", e);

        ApiError::Unauthorized {
            message: "Invalid or expired token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
