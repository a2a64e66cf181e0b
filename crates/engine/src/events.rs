//! Game-event ingest for the rest of the application
//!
//! Comment handlers and similar call sites report what happened; this
//! service runs the badge rules and any point rewards they carry.

use std::sync::Arc;

use common::models::{Badge, GameEvent};
use common::{Error, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::badges;
use crate::dispatch::{NewNotification, NotificationDispatcher};
use crate::levels;

pub struct EventService {
    pool: PgPool,
    dispatcher: Arc<NotificationDispatcher>,
}

impl EventService {
    pub fn new(pool: PgPool, dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { pool, dispatcher }
    }

    /// Evaluate badge rules for an event, returning the newly awarded badges
    pub async fn handle(&self, user_id: Uuid, event: GameEvent) -> Result<Vec<Badge>> {
        // Check-ins carry streak bookkeeping and go through their own flow
        if matches!(event, GameEvent::DailyCheckIn { .. }) {
            return Err(Error::Validation(
                "daily_check_in events are driven by the check-in endpoint".into(),
            ));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        // Lock the game-state row: badge rewards mutate the points total
        let state = db::users::game_state_for_update(&mut tx, user_id)
            .await
            .map_err(|e| Error::Database(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("user {user_id} not found")))?;

        let new_badges = badges::check_and_award(&mut tx, user_id, &event).await?;
        if new_badges.is_empty() {
            // Nothing to write; no new badges is a normal outcome
            return Ok(new_badges);
        }

        let mut staged = Vec::new();
        for badge in &new_badges {
            staged.push(
                self.dispatcher
                    .create(&mut *tx, &NewNotification::badge_awarded(user_id, badge))
                    .await?,
            );
        }

        let badge_reward: i64 = new_badges.iter().map(|b| b.reward_points).sum();
        let stats = if badge_reward > 0 {
            let applied = levels::apply_points(state.points, badge_reward)?;
            db::users::set_points(&mut *tx, user_id, applied.points, applied.level)
                .await
                .map_err(|e| Error::Database(e.to_string()))?;

            if applied.leveled_up {
                staged.push(
                    self.dispatcher
                        .create(&mut *tx, &NewNotification::level_up(user_id, applied.level))
                        .await?,
                );
            }
            Some(applied)
        } else {
            None
        };

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(
            user = %user_id,
            event = event.kind(),
            badges = new_badges.len(),
            "game event processed"
        );

        if let Some(applied) = stats {
            self.dispatcher
                .publish_stats(user_id, applied.points, applied.level, applied.leveled_up);
        }
        for notification in &staged {
            self.dispatcher.emit(&self.pool, notification).await;
        }

        Ok(new_badges)
    }
}
