use crate::{CoreError, CoreResult, MessageId};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;

/// Opaque resume marker: the id of the last message a client has seen.
///
/// The store assigns message ids in insert order, so "everything after
/// this cursor" is a single indexed range scan. The default cursor
/// resumes from the beginning of history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor(i64);

impl Cursor {
    /// Cursor before the first message ever stored.
    pub const START: Cursor = Cursor(0);

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whether a message with this id is newer than the cursor.
    pub fn is_before(&self, id: MessageId) -> bool {
        id.value() > self.0
    }
}

impl From<MessageId> for Cursor {
    fn from(id: MessageId) -> Self {
        Cursor(id.value())
    }
}

impl FromStr for Cursor {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s.parse::<i64>() {
            Ok(value) if value >= 0 => Ok(Cursor(value)),
            _ => Err(CoreError::InvalidCursor {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
