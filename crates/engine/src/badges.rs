//! Badge rule evaluation and awarding

use common::models::{Badge, GameEvent};
use common::Result;
use sqlx::PgConnection;
use tracing::info;
use uuid::Uuid;

/// Catalog entries whose threshold the event's counter meets
pub fn satisfied_rules<'a>(catalog: &'a [Badge], event: &GameEvent) -> Vec<&'a Badge> {
    catalog
        .iter()
        .filter(|badge| badge.event == event.kind() && event.counter() >= badge.threshold)
        .collect()
}

/// Evaluate the catalog for `event` and award anything newly satisfied.
///
/// Runs on the caller's open transaction so an award and the rest of the
/// operation commit or roll back together. The (user, badge) primary key
/// absorbs concurrent award attempts: a conflicting insert is reported as
/// "already owned", not an error, and such badges are excluded from the
/// returned list.
pub async fn check_and_award(
    conn: &mut PgConnection,
    user_id: Uuid,
    event: &GameEvent,
) -> Result<Vec<Badge>> {
    let catalog = db::badges::list_for_event(&mut *conn, event.kind())
        .await
        .map_err(|e| common::Error::Database(e.to_string()))?;

    let mut awarded = Vec::new();
    for badge in satisfied_rules(&catalog, event) {
        let newly = db::badges::award(&mut *conn, user_id, &badge.id)
            .await
            .map_err(|e| common::Error::Database(e.to_string()))?;

        if newly {
            info!(user = %user_id, badge = %badge.id, "badge awarded");
            awarded.push(badge.clone());
        }
    }

    Ok(awarded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(id: &str, event: &str, threshold: i64) -> Badge {
        Badge {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            icon: "🏆".to_string(),
            event: event.to_string(),
            threshold,
            reward_points: 0,
        }
    }

    #[test]
    fn test_threshold_must_be_met() {
        let catalog = vec![badge("streak_3", "daily_check_in", 3)];

        let below = GameEvent::DailyCheckIn { streak: 2 };
        assert!(satisfied_rules(&catalog, &below).is_empty());

        let at = GameEvent::DailyCheckIn { streak: 3 };
        assert_eq!(satisfied_rules(&catalog, &at).len(), 1);

        let above = GameEvent::DailyCheckIn { streak: 10 };
        assert_eq!(satisfied_rules(&catalog, &above).len(), 1);
    }

    #[test]
    fn test_event_kind_must_match() {
        let catalog = vec![badge("comment_1", "new_comment", 1)];

        let event = GameEvent::DailyCheckIn { streak: 100 };
        assert!(satisfied_rules(&catalog, &event).is_empty());
    }

    #[test]
    fn test_multiple_rules_can_fire_at_once() {
        let catalog = vec![
            badge("streak_3", "daily_check_in", 3),
            badge("streak_7", "daily_check_in", 7),
            badge("streak_30", "daily_check_in", 30),
        ];

        // A backfilled streak of 8 satisfies the first two rules together
        let event = GameEvent::DailyCheckIn { streak: 8 };
        let hits = satisfied_rules(&catalog, &event);
        let ids: Vec<&str> = hits.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["streak_3", "streak_7"]);
    }
}
