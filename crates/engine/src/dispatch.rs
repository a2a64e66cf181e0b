//! Notification creation and delivery
//!
//! The durable row is the source of truth; the realtime push is a
//! best-effort optimization on top of it and can never fail a request.

use std::sync::Arc;

use common::models::{Badge, Notification, NotificationKind};
use common::{Error, Result};
use realtime::{Envelope, RealtimePublisher};
use sqlx::{PgExecutor, PgPool};
use tracing::warn;
use uuid::Uuid;

/// Input for a new notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub message: String,
    pub link: Option<String>,
    pub icon_url: Option<String>,
}

impl NewNotification {
    pub fn new(recipient_id: Uuid, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            recipient_id,
            sender_id: None,
            kind,
            message: message.into(),
            link: None,
            icon_url: None,
        }
    }

    pub fn daily_reward(recipient_id: Uuid, reward: i64, streak: i32) -> Self {
        Self::new(
            recipient_id,
            NotificationKind::DailyReward,
            format!("Daily check-in: +{reward} points (day {streak} of your streak)"),
        )
    }

    pub fn badge_awarded(recipient_id: Uuid, badge: &Badge) -> Self {
        let mut n = Self::new(
            recipient_id,
            NotificationKind::NewBadge,
            format!("{} You earned the \"{}\" badge!", badge.icon, badge.name),
        );
        n.link = Some("/profile/badges".to_string());
        n
    }

    pub fn level_up(recipient_id: Uuid, level: i32) -> Self {
        Self::new(
            recipient_id,
            NotificationKind::LevelUp,
            format!("You reached level {level}!"),
        )
    }

    pub fn announcement(
        recipient_id: Uuid,
        sender_id: Option<Uuid>,
        message: &str,
        link: Option<&str>,
    ) -> Self {
        let mut n = Self::new(recipient_id, NotificationKind::SystemAnnouncement, message);
        n.sender_id = sender_id;
        n.link = link.map(str::to_string);
        n
    }
}

fn validate(input: &NewNotification) -> Result<()> {
    if input.recipient_id.is_nil() {
        return Err(Error::Validation("notification requires a recipient".into()));
    }
    if input.message.trim().is_empty() {
        return Err(Error::Validation("notification requires a message".into()));
    }
    Ok(())
}

/// Persists notifications and pushes them to live sessions.
///
/// The publisher is an injected capability so the dispatcher can be
/// exercised in tests without a socket layer.
pub struct NotificationDispatcher {
    publisher: Arc<dyn RealtimePublisher>,
}

impl NotificationDispatcher {
    pub fn new(publisher: Arc<dyn RealtimePublisher>) -> Self {
        Self { publisher }
    }

    /// Persist a notification row; runs on the pool or an open transaction
    pub async fn create(
        &self,
        exec: impl PgExecutor<'_>,
        input: &NewNotification,
    ) -> Result<Notification> {
        validate(input)?;

        db::notifications::insert(
            exec,
            input.recipient_id,
            input.sender_id,
            input.kind,
            &input.message,
            input.link.as_deref(),
            input.icon_url.as_deref(),
        )
        .await
        .map_err(|e| Error::Database(e.to_string()))
    }

    /// Push a persisted notification to the recipient's live connections.
    ///
    /// Fire-and-forget: any failure is logged and absorbed, the committed
    /// row stays authoritative and offline clients pick it up on next poll.
    pub async fn emit(&self, pool: &PgPool, notification: &Notification) {
        let unread_count =
            match db::notifications::unread_count(pool, notification.recipient_id).await {
                Ok(count) => count,
                Err(e) => {
                    warn!(error = %e, recipient = %notification.recipient_id,
                        "skipping realtime push, unread count unavailable");
                    return;
                }
            };

        self.publisher.publish(
            notification.recipient_id,
            Envelope::Notification {
                notification: notification.clone(),
                unread_count,
            },
        );
    }

    /// The one-call path for triggers that don't carry their own transaction
    pub async fn create_and_emit(
        &self,
        pool: &PgPool,
        input: NewNotification,
    ) -> Result<Notification> {
        let notification = self.create(pool, &input).await?;
        self.emit(pool, &notification).await;
        Ok(notification)
    }

    /// Push updated points/level stats to a user's live connections
    pub fn publish_stats(&self, user_id: Uuid, points: i64, level: i32, leveled_up: bool) {
        self.publisher.publish(
            user_id,
            Envelope::StatsUpdate {
                points,
                level,
                leveled_up,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Publisher fake that records everything it is asked to deliver
    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<(Uuid, Envelope)>>,
    }

    impl RealtimePublisher for RecordingPublisher {
        fn publish(&self, user_id: Uuid, event: Envelope) {
            self.published.lock().unwrap().push((user_id, event));
        }
    }

    #[test]
    fn test_validate_rejects_empty_message() {
        let input = NewNotification::new(
            Uuid::new_v4(),
            NotificationKind::SystemAnnouncement,
            "   ",
        );
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_rejects_nil_recipient() {
        let input = NewNotification::new(Uuid::nil(), NotificationKind::DailyReward, "hello");
        assert!(validate(&input).is_err());
    }

    #[test]
    fn test_validate_accepts_complete_input() {
        let input = NewNotification::daily_reward(Uuid::new_v4(), 15, 3);
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn test_publish_stats_reaches_publisher() {
        let publisher = Arc::new(RecordingPublisher::default());
        let dispatcher = NotificationDispatcher::new(publisher.clone());
        let user = Uuid::new_v4();

        dispatcher.publish_stats(user, 120, 2, true);

        let published = publisher.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, user);
        match &published[0].1 {
            Envelope::StatsUpdate {
                points,
                level,
                leveled_up,
            } => {
                assert_eq!(*points, 120);
                assert_eq!(*level, 2);
                assert!(*leveled_up);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_helper_constructors_set_kinds() {
        let user = Uuid::new_v4();
        let badge = Badge {
            id: "streak_7".to_string(),
            name: "One Week Strong".to_string(),
            description: String::new(),
            icon: "📅".to_string(),
            event: "daily_check_in".to_string(),
            threshold: 7,
            reward_points: 30,
        };

        assert_eq!(
            NewNotification::daily_reward(user, 15, 1).kind,
            NotificationKind::DailyReward
        );
        assert_eq!(
            NewNotification::badge_awarded(user, &badge).kind,
            NotificationKind::NewBadge
        );
        assert_eq!(
            NewNotification::level_up(user, 3).kind,
            NotificationKind::LevelUp
        );

        let announcement =
            NewNotification::announcement(user, None, "Maintenance tonight", Some("/news"));
        assert_eq!(announcement.kind, NotificationKind::SystemAnnouncement);
        assert_eq!(announcement.link.as_deref(), Some("/news"));
    }
}
