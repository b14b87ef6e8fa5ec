use crate::{BroadcastError, Result as BroadcastErrorResult, SubscriberId};

use chat_core::{ChatMessage, Cursor, Role};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Registry of active subscribers, owned by one broadcast channel.
///
/// This is the only shared mutable state in the component. Critical
/// sections never await, so the lock is a plain `std::sync::RwLock` and
/// unregistration is safe from `Drop`.
pub struct SubscriberRegistry {
    inner: Arc<RwLock<RegistryInner>>,
    max_subscribers: usize,
}

struct RegistryInner {
    subscribers: HashMap<SubscriberId, SubscriberInfo>,
}

/// Per-subscriber bookkeeping held for the subscriber's lifetime.
struct SubscriberInfo {
    group: Role,
    cursor: Cursor,
    connected_at: DateTime<Utc>,
    sender: mpsc::Sender<ChatMessage>,
}

impl SubscriberRegistry {
    pub fn new(max_subscribers: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                subscribers: HashMap::new(),
            })),
            max_subscribers,
        }
    }

    /// Register a new subscriber, returns its id if under the limit.
    pub fn register(
        &self,
        group: Role,
        cursor: Cursor,
        sender: mpsc::Sender<ChatMessage>,
    ) -> BroadcastErrorResult<SubscriberId> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if inner.subscribers.len() >= self.max_subscribers {
            warn!(
                "Subscriber limit reached: {}/{}",
                inner.subscribers.len(),
                self.max_subscribers
            );
            return Err(BroadcastError::SubscriberLimitExceeded {
                current: inner.subscribers.len(),
                max: self.max_subscribers,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let subscriber_id = SubscriberId::new();
        inner.subscribers.insert(
            subscriber_id,
            SubscriberInfo {
                group,
                cursor,
                connected_at: Utc::now(),
                sender,
            },
        );

        debug!(
            "Registered subscriber {subscriber_id} for group {group} ({} total)",
            inner.subscribers.len()
        );

        Ok(subscriber_id)
    }

    /// Remove a subscriber; idempotent.
    pub fn unregister(&self, subscriber_id: SubscriberId) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if inner.subscribers.remove(&subscriber_id).is_some() {
            debug!(
                "Unregistered subscriber {subscriber_id} ({} remaining)",
                inner.subscribers.len()
            );
        }
    }

    pub fn contains(&self, subscriber_id: SubscriberId) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.contains_key(&subscriber_id)
    }

    pub fn total_count(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.len()
    }

    /// Deliver a published message to every interested subscriber.
    ///
    /// Senders are cloned under the read lock and sends happen outside
    /// it. A subscriber whose queue is full or closed is dropped; the
    /// others are unaffected. Returns the delivered count.
    pub fn fan_out(&self, message: &ChatMessage) -> usize {
        let targets: Vec<(SubscriberId, mpsc::Sender<ChatMessage>)> = {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            inner
                .subscribers
                .iter()
                .filter(|(_, info)| info.group == message.group && info.cursor.is_before(message.id))
                .map(|(id, info)| (*id, info.sender.clone()))
                .collect()
        };

        let mut delivered = 0;
        let mut stale: Vec<SubscriberId> = Vec::new();

        for (subscriber_id, sender) in targets {
            match sender.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!("Subscriber {subscriber_id} queue full, disconnecting slow subscriber");
                    stale.push(subscriber_id);
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Subscriber {subscriber_id} channel closed, removing");
                    stale.push(subscriber_id);
                }
            }
        }

        for subscriber_id in stale {
            self.unregister(subscriber_id);
        }

        delivered
    }

    /// Subscriber count for one group.
    pub fn group_count(&self, group: Role) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .subscribers
            .values()
            .filter(|s| s.group == group)
            .count()
    }

    /// When the oldest still-connected subscriber registered.
    pub fn oldest_connected_at(&self) -> Option<DateTime<Utc>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.subscribers.values().map(|s| s.connected_at).min()
    }
}

impl Clone for SubscriberRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            max_subscribers: self.max_subscribers,
        }
    }
}
