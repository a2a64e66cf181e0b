//! Admin routes

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult, DbResultExt, OptionExt};
use crate::routes::actor_id;
use crate::state::AppState;
use common::models::Role;
use engine::broadcast::BroadcastReport;

#[derive(Deserialize)]
pub struct BroadcastBody {
    pub message: String,
    pub link: Option<String>,
    /// Restrict recipients to one role; absent means everyone
    pub role: Option<Role>,
}

pub async fn broadcast(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<BroadcastBody>,
) -> ApiResult<Json<BroadcastReport>> {
    let actor = actor_id(&headers)?;

    let user = db::users::get_by_id(&state.pool, actor)
        .await
        .db_err()?
        .not_found(format!("User {} not found", actor))?;
    if user.role != Role::Admin {
        return Err(ApiError::Forbidden(
            "admin role required to broadcast".to_string(),
        ));
    }

    let report = state
        .broadcaster
        .broadcast_to_role(Some(actor), body.role, &body.message, body.link.as_deref())
        .await?;

    Ok(Json(report))
}
