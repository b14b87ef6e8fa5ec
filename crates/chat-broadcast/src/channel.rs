use crate::{
    BroadcastConfig, MessageStore, Result as BroadcastErrorResult, SubscriberId,
    SubscriberRegistry, Subscription,
};

use chat_auth::CurrentUser;
use chat_core::{ChatMessage, Cursor, Role, sanitize_content, validate_message_content};

use std::sync::Arc;

use log::debug;
use tokio::sync::mpsc;

/// Options for [`BroadcastChannel::subscribe`].
#[derive(Debug, Clone, Copy)]
pub struct SubscribeOptions {
    /// Group whose messages the subscriber receives.
    pub group: Role,
    /// Resume point; `Cursor::START` replays all stored history.
    pub since: Cursor,
}

/// The broadcast channel: durably records each published message once
/// and delivers it to every active subscriber of its group.
///
/// One instance per server; shared by cloning (all clones fan out to
/// the same subscriber set).
pub struct BroadcastChannel {
    store: Arc<dyn MessageStore>,
    registry: SubscriberRegistry,
    config: BroadcastConfig,
}

impl BroadcastChannel {
    pub fn new(store: Arc<dyn MessageStore>, config: BroadcastConfig) -> Self {
        Self {
            store,
            registry: SubscriberRegistry::new(config.max_subscribers),
            config,
        }
    }

    pub fn registry(&self) -> &SubscriberRegistry {
        &self.registry
    }

    /// Validate, persist, and fan out a message.
    ///
    /// A store failure is reported synchronously and nothing is
    /// delivered. Subscriber failures never surface here; a subscriber
    /// with a full or closed queue is dropped during fan-out.
    pub async fn publish(
        &self,
        author: &CurrentUser,
        content: &str,
    ) -> BroadcastErrorResult<ChatMessage> {
        validate_message_content(content)?;

        let message = self
            .store
            .insert(author.id, &sanitize_content(content))
            .await?;

        let delivered = self.registry.fan_out(&message);
        debug!(
            "Published message {} to group {} ({} subscribers)",
            message.id, message.group, delivered
        );

        Ok(message)
    }

    /// Register a subscriber and load its catch-up.
    ///
    /// Registration happens before the catch-up query so a message
    /// published in between is buffered on the live queue rather than
    /// missed; the subscription deduplicates the overlap by id.
    pub async fn subscribe(
        &self,
        options: SubscribeOptions,
    ) -> BroadcastErrorResult<Subscription> {
        let (sender, receiver) = mpsc::channel(self.config.send_buffer_size);

        let subscriber_id = self
            .registry
            .register(options.group, options.since, sender)?;

        let catch_up = match self
            .store
            .query_since(options.group, options.since, self.config.catch_up_limit)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                self.registry.unregister(subscriber_id);
                return Err(e);
            }
        };

        Ok(Subscription::new(
            subscriber_id,
            options.group,
            catch_up,
            receiver,
            options.since,
            self.registry.clone(),
        ))
    }

    /// Remove a subscriber; idempotent.
    pub fn unsubscribe(&self, subscriber_id: SubscriberId) {
        self.registry.unregister(subscriber_id);
    }
}

impl Clone for BroadcastChannel {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            registry: self.registry.clone(),
            config: self.config.clone(),
        }
    }
}
