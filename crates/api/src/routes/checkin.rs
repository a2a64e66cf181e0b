//! Daily check-in route

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use common::models::CheckInOutcome;

use crate::error::ApiResult;
use crate::routes::actor_id;
use crate::state::AppState;

/// A rejected same-day check-in is a normal outcome: the response carries
/// `accepted: false` and a reason, not an error status.
pub async fn check_in(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<CheckInOutcome>> {
    let user_id = actor_id(&headers)?;

    let outcome = state.check_in.check_in(user_id, Utc::now()).await?;

    Ok(Json(outcome))
}
