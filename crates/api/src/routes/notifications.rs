//! Notification routes
//!
//! All endpoints act on the requesting user's own notifications; ownership
//! is enforced by scoping every query to the actor id.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, DbResultExt};
use crate::routes::actor_id;
use crate::state::AppState;
use common::models::Notification;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

#[derive(Serialize)]
pub struct MarkAllResult {
    pub updated: u64,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let user_id = actor_id(&headers)?;

    let limit = query.limit.clamp(1, 100);
    let notifications = db::notifications::list_for_recipient(&state.pool, user_id, limit)
        .await
        .db_err()?;

    Ok(Json(notifications))
}

pub async fn unread_count(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<UnreadCount>> {
    let user_id = actor_id(&headers)?;

    let unread = db::notifications::unread_count(&state.pool, user_id)
        .await
        .db_err()?;

    Ok(Json(UnreadCount { unread }))
}

pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UnreadCount>> {
    let user_id = actor_id(&headers)?;

    let updated = db::notifications::mark_read(&state.pool, id, user_id)
        .await
        .db_err()?;
    if !updated {
        return Err(ApiError::NotFound(format!("Notification {} not found", id)));
    }

    let unread = db::notifications::unread_count(&state.pool, user_id)
        .await
        .db_err()?;

    Ok(Json(UnreadCount { unread }))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<MarkAllResult>> {
    let user_id = actor_id(&headers)?;

    let updated = db::notifications::mark_all_read(&state.pool, user_id)
        .await
        .db_err()?;

    Ok(Json(MarkAllResult { updated }))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UnreadCount>> {
    let user_id = actor_id(&headers)?;

    let deleted = db::notifications::delete(&state.pool, id, user_id)
        .await
        .db_err()?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Notification {} not found", id)));
    }

    let unread = db::notifications::unread_count(&state.pool, user_id)
        .await
        .db_err()?;

    Ok(Json(UnreadCount { unread }))
}
