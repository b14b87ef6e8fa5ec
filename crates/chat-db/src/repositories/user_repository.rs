use crate::error::DbError;
use crate::Result as DbErrorResult;

use chat_core::{Role, User};

use std::panic::Location;
use std::str::FromStr;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::SqlitePool;
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        let id = user.id.to_string();
        let created_at = user.created_at.timestamp_millis();

        sqlx::query(
            r#"
              INSERT INTO users (id, email, name, role, created_at)
              VALUES (?, ?, ?, ?, ?)
              "#,
        )
        .bind(&id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let id_str = id.to_string();

        let row: Option<(String, String, String, String, i64)> = sqlx::query_as(
            r#"
              SELECT id, email, name, role, created_at
              FROM users
              WHERE id = ?
              "#,
        )
        .bind(&id_str)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(id, email, name, role, created_at)| -> DbErrorResult<User> {
            Ok(User {
                id: Uuid::parse_str(&id).map_err(|e| DbError::Initialization {
                    message: format!("Invalid UUID in users.id: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?,
                email,
                name,
                role: Role::from_str(&role).map_err(|e| DbError::Initialization {
                    message: format!("Invalid role in users.role: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?,
                created_at: DateTime::from_timestamp_millis(created_at).ok_or_else(|| {
                    DbError::Initialization {
                        message: format!("Invalid timestamp in users.created_at: {}", created_at),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?,
            })
        })
        .transpose()
    }
}
