use serde::Deserialize;

/// Query string for `GET /api/v1/messages` and the stream endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesQuery {
    /// Cursor of the last message the client has seen.
    pub since: Option<String>,
}
