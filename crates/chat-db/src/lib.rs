pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::message_repository::MessageRepository;
pub use repositories::user_repository::UserRepository;

use std::panic::Location;

use error_location::ErrorLocation;
use sqlx::SqlitePool;

/// Embedded migrations for the chat schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await.map_err(|e| DbError::Migration {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}
