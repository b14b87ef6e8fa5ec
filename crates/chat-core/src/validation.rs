use crate::{CoreError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Maximum message length in characters.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Validate message content before it reaches the store.
///
/// Content must be non-empty after trimming and within the length cap.
#[track_caller]
pub fn validate_message_content(content: &str) -> CoreResult<()> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation {
            message: "content cannot be empty".to_string(),
            field: Some("content".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation {
            message: format!("content must not exceed {} characters", MAX_CONTENT_LENGTH),
            field: Some("content".to_string()),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}

/// Trim surrounding whitespace and strip control characters (newlines
/// and tabs are kept).
pub fn sanitize_content(content: &str) -> String {
    content
        .trim()
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
