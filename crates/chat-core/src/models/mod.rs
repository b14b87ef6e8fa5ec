pub mod cursor;
pub mod message;
pub mod role;
pub mod user;
