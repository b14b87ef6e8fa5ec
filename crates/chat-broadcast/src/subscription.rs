use crate::{SubscriberId, SubscriberRegistry};

use chat_core::{ChatMessage, Cursor, Role};

use std::collections::VecDeque;

use tokio::sync::mpsc;

/// A live view over one subscriber's message sequence.
///
/// Yields catch-up messages first, then live deliveries, each in
/// strictly increasing id order. Messages that arrive on the live queue
/// while catch-up is still being read are deduplicated by id, so the
/// seam between the two phases never repeats or skips a message.
///
/// Dropping the subscription unregisters it; resuming requires a new
/// subscription with the cursor from the last seen message.
pub struct Subscription {
    subscriber_id: SubscriberId,
    group: Role,
    catch_up: VecDeque<ChatMessage>,
    live: mpsc::Receiver<ChatMessage>,
    last_delivered: Cursor,
    registry: SubscriberRegistry,
}

impl Subscription {
    pub(crate) fn new(
        subscriber_id: SubscriberId,
        group: Role,
        catch_up: Vec<ChatMessage>,
        live: mpsc::Receiver<ChatMessage>,
        since: Cursor,
        registry: SubscriberRegistry,
    ) -> Self {
        Self {
            subscriber_id,
            group,
            catch_up: catch_up.into(),
            live,
            last_delivered: since,
            registry,
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.subscriber_id
    }

    pub fn group(&self) -> Role {
        self.group
    }

    /// Cursor of the last delivered message.
    pub fn cursor(&self) -> Cursor {
        self.last_delivered
    }

    /// Next message, waiting for a live delivery when caught up.
    ///
    /// Returns `None` once the subscriber has been removed from the
    /// registry (slow-subscriber disconnect or explicit unsubscribe)
    /// and the remaining queue is drained.
    pub async fn next(&mut self) -> Option<ChatMessage> {
        loop {
            let message = match self.catch_up.pop_front() {
                Some(message) => Some(message),
                None => self.live.recv().await,
            };

            match message {
                Some(message) if !self.last_delivered.is_before(message.id) => {
                    // Already seen across the catch-up/live seam
                    continue;
                }
                Some(message) => {
                    self.last_delivered = message.cursor();
                    return Some(message);
                }
                None => return None,
            }
        }
    }

    /// Next message that is already available, without waiting.
    ///
    /// The polling transport drains a fresh subscription with this and
    /// responds immediately.
    pub fn try_next(&mut self) -> Option<ChatMessage> {
        loop {
            let message = match self.catch_up.pop_front() {
                Some(message) => Some(message),
                None => self.live.try_recv().ok(),
            };

            match message {
                Some(message) if !self.last_delivered.is_before(message.id) => continue,
                Some(message) => {
                    self.last_delivered = message.cursor();
                    return Some(message);
                }
                None => return None,
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Closing the underlying connection drops the subscription,
        // which must unsubscribe synchronously.
        self.registry.unregister(self.subscriber_id);
    }
}
