//! API routes

pub mod admin;
pub mod checkin;
pub mod events;
pub mod health;
pub mod notifications;
pub mod users;
pub mod ws;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::ApiError;

/// Resolve the acting user from the `x-user-id` header.
///
/// Authentication itself lives in the session layer upstream; by the time a
/// request reaches this API the header carries an already-verified user id.
pub fn actor_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| ApiError::Validation("missing or invalid x-user-id header".to_string()))
}
