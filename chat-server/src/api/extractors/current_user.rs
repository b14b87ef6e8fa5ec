//! Axum extractors for REST API authentication

use crate::ApiError;

use chat_auth::CurrentUser;
use chat_broadcast::AppState;
use chat_db::UserRepository;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;
use uuid::Uuid;

/// Extracts the authenticated caller from the request
///
/// Validates the `Authorization: Bearer` token and resolves the user
/// row behind it. Requests without a valid token are rejected with 401;
/// a valid token whose user row has vanished is a 404.
pub struct Authenticated(pub CurrentUser);

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let auth_header = parts
                .headers
                .get("authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    log::warn!("Missing Authorization header");
                    ApiError::Unauthorized {
                        message: "Missing Authorization header".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    }
                })?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                log::warn!("Invalid authorization scheme: expected 'Bearer'");
                ApiError::Unauthorized {
                    message: "Expected Bearer authorization".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let claims = state.jwt_validator.validate(token)?;

            let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
                log::warn!("Token subject is not a valid UUID");
                ApiError::Unauthorized {
                    message: "Invalid token subject".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

            let user = UserRepository::new(state.pool.clone())
                .find_by_id(user_id)
                .await?
                .ok_or_else(|| ApiError::NotFound {
                    message: format!("User {} not found", user_id),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            Ok(Authenticated(CurrentUser::from(user)))
        }
    }
}
