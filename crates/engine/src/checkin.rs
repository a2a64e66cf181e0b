//! Daily check-in flow

use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::models::{CheckInOutcome, GameEvent};
use common::{Error, Result};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::badges;
use crate::dispatch::{NewNotification, NotificationDispatcher};
use crate::levels;
use crate::streak::{self, CheckInDecision};

/// Runs the once-per-day check-in: streak decision, reward points, badge
/// rules and notifications, all committed in a single transaction.
pub struct CheckInService {
    pool: PgPool,
    dispatcher: Arc<NotificationDispatcher>,
    reward: i64,
}

impl CheckInService {
    pub fn new(pool: PgPool, dispatcher: Arc<NotificationDispatcher>, reward: i64) -> Self {
        Self {
            pool,
            dispatcher,
            reward,
        }
    }

    pub async fn check_in(&self, user_id: Uuid, now: DateTime<Utc>) -> Result<CheckInOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let state = db::users::game_state_for_update(&mut tx, user_id)
            .await
            .map_err(|e| Error::Database(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("user {user_id} not found")))?;

        // The guard runs under the row lock, so two concurrent requests for
        // the same user cannot both observe "not yet checked in today".
        let decision = streak::evaluate_check_in(now, state.last_check_in_at, state.current_streak);

        let streak_value = match decision {
            CheckInDecision::AlreadyCheckedIn => {
                return Ok(CheckInOutcome {
                    accepted: false,
                    streak: state.current_streak,
                    points: state.points,
                    level: state.level,
                    leveled_up: false,
                    reason: Some(streak::ALREADY_CHECKED_IN.to_string()),
                    new_badges: Vec::new(),
                });
            }
            CheckInDecision::Continued { streak } => streak,
            CheckInDecision::Reset { streak } => streak,
        };

        let mut applied = levels::apply_points(state.points, self.reward)?;
        let mut leveled_up = applied.leveled_up;

        let event = GameEvent::DailyCheckIn {
            streak: streak_value,
        };
        let new_badges = badges::check_and_award(&mut tx, user_id, &event).await?;

        let badge_reward: i64 = new_badges.iter().map(|b| b.reward_points).sum();
        if badge_reward > 0 {
            applied = levels::apply_points(applied.points, badge_reward)?;
            leveled_up = leveled_up || applied.leveled_up;
        }

        db::users::apply_check_in(&mut tx, user_id, applied.points, applied.level, streak_value, now)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        // Durable notifications ride the same transaction as the state they
        // describe; a crash before commit leaves no partial award behind.
        let mut staged = Vec::new();
        staged.push(
            self.dispatcher
                .create(
                    &mut *tx,
                    &NewNotification::daily_reward(user_id, self.reward, streak_value),
                )
                .await?,
        );
        for badge in &new_badges {
            staged.push(
                self.dispatcher
                    .create(&mut *tx, &NewNotification::badge_awarded(user_id, badge))
                    .await?,
            );
        }
        if leveled_up {
            staged.push(
                self.dispatcher
                    .create(&mut *tx, &NewNotification::level_up(user_id, applied.level))
                    .await?,
            );
        }

        tx.commit()
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        info!(
            user = %user_id,
            streak = streak_value,
            points = applied.points,
            badges = new_badges.len(),
            "check-in accepted"
        );

        // Realtime pushes happen after commit and cannot fail the request
        self.dispatcher
            .publish_stats(user_id, applied.points, applied.level, leveled_up);
        for notification in &staged {
            self.dispatcher.emit(&self.pool, notification).await;
        }

        Ok(CheckInOutcome {
            accepted: true,
            streak: streak_value,
            points: applied.points,
            level: applied.level,
            leveled_up,
            reason: None,
            new_badges,
        })
    }
}
