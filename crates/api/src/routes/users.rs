//! User routes

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiResult, DbResultExt, OptionExt};
use crate::state::AppState;
use common::models::{User, UserBadge};

#[derive(Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub user: User,
    pub badges: Vec<UserBadge>,
    /// Points total at which the next level starts, absent at the cap
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_level_at: Option<i64>,
}

/// Get-or-create a user record for an account the auth layer knows about
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<Json<User>> {
    let username = body.username.trim();
    if username.is_empty() {
        return Err(crate::error::ApiError::Validation(
            "username must not be empty".to_string(),
        ));
    }

    let user = db::users::upsert(&state.pool, username, body.avatar_url.as_deref())
        .await
        .db_err()?;

    Ok(Json(user))
}

pub async fn profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<UserProfile>> {
    let user = db::users::get_by_id(&state.pool, id)
        .await
        .db_err()?
        .not_found(format!("User {} not found", id))?;

    let badges = db::badges::list_for_user(&state.pool, id).await.db_err()?;

    Ok(Json(UserProfile {
        next_level_at: engine::levels::next_level_at(user.points),
        user,
        badges,
    }))
}
