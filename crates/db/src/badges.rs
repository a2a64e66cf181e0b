//! Badge catalog and award queries

use common::models::{Badge, UserBadge};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, Row};
use uuid::Uuid;

fn map_badge(row: PgRow) -> Badge {
    Badge {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        icon: row.get("icon"),
        event: row.get("event"),
        threshold: row.get("threshold"),
        reward_points: row.get("reward_points"),
    }
}

/// Load the catalog entries that react to an event kind
pub async fn list_for_event(
    exec: impl PgExecutor<'_>,
    event: &str,
) -> Result<Vec<Badge>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, icon, event, threshold, reward_points
        FROM badges
        WHERE event = $1
        ORDER BY threshold ASC
        "#,
    )
    .bind(event)
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(map_badge).collect())
}

/// Award a badge to a user, returning whether a new row was created.
///
/// A conflicting insert means the user already holds the badge; that is a
/// normal outcome, not an error.
pub async fn award(
    exec: impl PgExecutor<'_>,
    user_id: Uuid,
    badge_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO user_badges (user_id, badge_id, awarded_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id, badge_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(badge_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Get all badges held by a user with catalog details
pub async fn list_for_user(
    exec: impl PgExecutor<'_>,
    user_id: Uuid,
) -> Result<Vec<UserBadge>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT ub.user_id, ub.badge_id, ub.awarded_at,
               b.name, b.description, b.icon
        FROM user_badges ub
        JOIN badges b ON b.id = ub.badge_id
        WHERE ub.user_id = $1
        ORDER BY ub.awarded_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(exec)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| UserBadge {
            user_id: r.get("user_id"),
            badge_id: r.get("badge_id"),
            awarded_at: r.get("awarded_at"),
            name: Some(r.get("name")),
            description: Some(r.get("description")),
            icon: Some(r.get("icon")),
        })
        .collect())
}
