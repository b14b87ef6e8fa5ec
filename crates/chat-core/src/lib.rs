pub mod error;
pub mod models;
pub mod validation;


pub use error::{CoreError, CoreResult};
pub use models::cursor::Cursor;
pub use models::message::{ChatMessage, MessageId};
pub use models::role::Role;
pub use models::user::User;
pub use validation::{MAX_CONTENT_LENGTH, sanitize_content, validate_message_content};
