use chat_auth::{Claims, JwtValidator};
use chat_broadcast::{
    AppState, BroadcastChannel, BroadcastConfig, DeliveryMode, SqliteMessageStore,
};
use chat_core::{Role, User};
use chat_db::UserRepository;

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-unit-tests";

pub async fn create_test_state() -> AppState {
    // Single connection keeps the in-memory database alive and shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    chat_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let store = Arc::new(SqliteMessageStore::new(pool.clone()));
    let channel = BroadcastChannel::new(store, BroadcastConfig::default());

    AppState {
        pool,
        channel,
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_SECRET)),
        delivery: DeliveryMode::Polling,
        stream_idle: Duration::from_secs(60),
    }
}

pub async fn create_test_user(pool: &SqlitePool, name: &str, role: Role) -> User {
    let user = User::new(format!("{name}@example.com"), name.to_string(), role);

    UserRepository::new(pool.clone())
        .create(&user)
        .await
        .expect("Failed to create test user");

    user
}

/// Bearer header value for a token signed with the test secret.
pub fn bearer_token(user: &User) -> String {
    let now = get_current_timestamp() as i64;
    let claims = Claims {
        sub: user.id.to_string(),
        exp: now + 3600,
        iat: now,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to encode test token");

    format!("Bearer {token}")
}

/// Token signed with the test secret that expired an hour ago.
pub fn expired_bearer_token(user: &User) -> String {
    let now = get_current_timestamp() as i64;
    let claims = Claims {
        sub: user.id.to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to encode test token");

    format!("Bearer {token}")
}
