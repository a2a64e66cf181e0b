//! Game-event ingest route
//!
//! Internal hook for the rest of the application: a comment handler posts
//! the event here after it commits its own write, and the badge rules run
//! against the counters it reports.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::AppState;
use common::models::{Badge, GameEvent};

#[derive(Deserialize)]
pub struct EventBody {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub event: GameEvent,
}

pub async fn ingest(
    State(state): State<Arc<AppState>>,
    Json(body): Json<EventBody>,
) -> ApiResult<Json<Vec<Badge>>> {
    let badges = state.events.handle(body.user_id, body.event).await?;

    Ok(Json(badges))
}
