//! Domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A community member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub points: i64,
    pub level: i32,
    pub last_check_in_at: Option<DateTime<Utc>>,
    pub current_streak: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Moderator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "moderator" => Some(Role::Moderator),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// The gamification columns of a user row.
///
/// This is the projection read under a row lock during check-in, so
/// concurrent requests for the same user serialize on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub points: i64,
    pub level: i32,
    pub last_check_in_at: Option<DateTime<Utc>>,
    pub current_streak: i32,
}

/// A badge catalog entry, created by administrators and read-only here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub event: String,
    pub threshold: i64,
    pub reward_points: i64,
}

/// A badge held by a user, unique per (user, badge)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBadge {
    pub user_id: Uuid,
    pub badge_id: String,
    pub awarded_at: DateTime<Utc>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// An event the badge evaluator reacts to.
///
/// Carries the aggregate counter the rules for that event compare against;
/// the counter is derived by the caller from data it owns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    DailyCheckIn { streak: i32 },
    NewComment { total_comments: i64 },
}

impl GameEvent {
    /// Catalog key for this event
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::DailyCheckIn { .. } => "daily_check_in",
            GameEvent::NewComment { .. } => "new_comment",
        }
    }

    /// The counter badge thresholds compare against
    pub fn counter(&self) -> i64 {
        match self {
            GameEvent::DailyCheckIn { streak } => *streak as i64,
            GameEvent::NewComment { total_comments } => *total_comments,
        }
    }
}

/// A durable notification owned by its recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub sender_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub message: String,
    pub link: Option<String>,
    pub icon_url: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SystemAnnouncement,
    CommentReply,
    ReportStatus,
    NewBadge,
    DailyReward,
    ContentReport,
    LevelUp,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::SystemAnnouncement => "system_announcement",
            NotificationKind::CommentReply => "comment_reply",
            NotificationKind::ReportStatus => "report_status",
            NotificationKind::NewBadge => "new_badge",
            NotificationKind::DailyReward => "daily_reward",
            NotificationKind::ContentReport => "content_report",
            NotificationKind::LevelUp => "level_up",
        }
    }

    pub fn parse(s: &str) -> Option<NotificationKind> {
        match s {
            "system_announcement" => Some(NotificationKind::SystemAnnouncement),
            "comment_reply" => Some(NotificationKind::CommentReply),
            "report_status" => Some(NotificationKind::ReportStatus),
            "new_badge" => Some(NotificationKind::NewBadge),
            "daily_reward" => Some(NotificationKind::DailyReward),
            "content_report" => Some(NotificationKind::ContentReport),
            "level_up" => Some(NotificationKind::LevelUp),
            _ => None,
        }
    }
}

/// Result of a daily check-in attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub accepted: bool,
    pub streak: i32,
    pub points: i64,
    pub level: i32,
    pub leveled_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub new_badges: Vec<Badge>,
}
