#![allow(dead_code)]

use chat_core::{Role, User};
use chat_db::UserRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    chat_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Inserts a user with the given role and returns it
pub async fn create_test_user(pool: &SqlitePool, name: &str, role: Role) -> User {
    let user = User::new(format!("{}-{}@test.local", name, Uuid::new_v4()), name.to_string(), role);

    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to create test user");

    user
}
