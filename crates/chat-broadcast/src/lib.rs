pub mod app_state;
pub mod broadcast_config;
pub mod channel;
pub mod delivery_mode;
pub mod error;
pub mod store;
pub mod subscriber_id;
pub mod subscriber_registry;
pub mod subscription;


pub use app_state::AppState;
pub use broadcast_config::BroadcastConfig;
pub use channel::{BroadcastChannel, SubscribeOptions};
pub use delivery_mode::DeliveryMode;
pub use error::{BroadcastError, Result};
pub use store::{MessageStore, SqliteMessageStore};
pub use subscriber_id::SubscriberId;
pub use subscriber_registry::SubscriberRegistry;
pub use subscription::Subscription;
