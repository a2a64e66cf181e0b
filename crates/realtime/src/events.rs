//! Realtime event payloads

use common::models::Notification;
use serde::Serialize;

/// Server → client event pushed into a user's room
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Updated points/level after a core operation
    StatsUpdate {
        points: i64,
        level: i32,
        leveled_up: bool,
    },
    /// A freshly persisted notification plus the recipient's unread total
    Notification {
        notification: Notification,
        unread_count: i64,
    },
}
