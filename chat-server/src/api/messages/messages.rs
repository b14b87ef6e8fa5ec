//! Message REST API handlers
//!
//! The polling and streaming read paths are both thin consumers of the
//! broadcast channel's subscribe contract: polling drains a short-lived
//! subscription and responds at once, streaming keeps one open and
//! writes each delivery as an SSE frame.

use crate::{
    ApiResult, Authenticated, CreateMessageRequest, ListMessagesQuery, MessageDto,
    MessageListResponse, MessageResponse,
};

use chat_broadcast::{AppState, SubscribeOptions};
use chat_core::Cursor;

use std::convert::Infallible;
use std::str::FromStr;

use axum::{
    Json,
    extract::{Query, State},
    response::sse::{Event, Sse},
};
use futures::Stream;

fn parse_cursor(query: &ListMessagesQuery) -> ApiResult<Cursor> {
    match query.since.as_deref() {
        Some(raw) => Ok(Cursor::from_str(raw)?),
        None => Ok(Cursor::START),
    }
}

/// POST /api/v1/messages
pub async fn create_message(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Json(req): Json<CreateMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message = state.channel.publish(&user, &req.content).await?;

    log::info!(
        "User {} published message {} to group {}",
        user.id,
        message.id,
        message.group
    );

    Ok(Json(MessageResponse {
        message: message.into(),
    }))
}

/// GET /api/v1/messages?since=<cursor>
///
/// Each poll is its own bounded subscribe/drain/unsubscribe: the
/// subscription's catch-up holds everything after the cursor, and
/// dropping it at the end of the handler unregisters the subscriber.
pub async fn list_messages(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Query(query): Query<ListMessagesQuery>,
) -> ApiResult<Json<MessageListResponse>> {
    let since = parse_cursor(&query)?;

    let mut subscription = state
        .channel
        .subscribe(SubscribeOptions {
            group: user.role,
            since,
        })
        .await?;

    let mut messages = Vec::new();
    while let Some(message) = subscription.try_next() {
        messages.push(MessageDto::from(message));
    }

    Ok(Json(MessageListResponse { messages }))
}

/// GET /api/v1/messages/stream?since=<cursor>
///
/// One long-lived `text/event-stream` response per subscriber, fed by
/// live fan-out rather than interval re-polling. The stream ends when
/// the subscriber is dropped by the registry or after the configured
/// idle period; the client reconnects with its last seen cursor.
pub async fn stream_messages(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    Query(query): Query<ListMessagesQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let since = parse_cursor(&query)?;

    let subscription = state
        .channel
        .subscribe(SubscribeOptions {
            group: user.role,
            since,
        })
        .await?;

    log::debug!(
        "User {} opened stream {} (group {}, since {})",
        user.id,
        subscription.id(),
        user.role,
        since
    );

    let idle = state.stream_idle;
    let stream = futures::stream::unfold(subscription, move |mut subscription| async move {
        match tokio::time::timeout(idle, subscription.next()).await {
            Ok(Some(message)) => match Event::default().json_data(MessageDto::from(message)) {
                Ok(event) => Some((Ok::<_, Infallible>(event), subscription)),
                Err(e) => {
                    log::error!("Failed to encode SSE frame: {}", e);
                    None
                }
            },
            // Subscriber was removed from the registry
            Ok(None) => None,
            Err(_) => {
                log::debug!("Stream {} idle, closing", subscription.id());
                None
            }
        }
    });

    Ok(Sse::new(stream))
}
