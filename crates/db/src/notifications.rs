//! Notification queries

use common::models::{Notification, NotificationKind};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, Row};
use uuid::Uuid;

fn map_notification(row: PgRow) -> Result<Notification, sqlx::Error> {
    let kind: String = row.get("kind");
    let kind = NotificationKind::parse(&kind)
        .ok_or_else(|| sqlx::Error::Decode(format!("unknown notification kind: {kind}").into()))?;

    Ok(Notification {
        id: row.get("id"),
        recipient_id: row.get("recipient_id"),
        sender_id: row.get("sender_id"),
        kind,
        message: row.get("message"),
        link: row.get("link"),
        icon_url: row.get("icon_url"),
        is_read: row.get("is_read"),
        created_at: row.get("created_at"),
    })
}

/// Insert a new unread notification
#[allow(clippy::too_many_arguments)]
pub async fn insert(
    exec: impl PgExecutor<'_>,
    recipient_id: Uuid,
    sender_id: Option<Uuid>,
    kind: NotificationKind,
    message: &str,
    link: Option<&str>,
    icon_url: Option<&str>,
) -> Result<Notification, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO notifications (id, recipient_id, sender_id, kind, message, link, icon_url, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, NOW())
        RETURNING id, recipient_id, sender_id, kind, message, link, icon_url, is_read, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(recipient_id)
    .bind(sender_id)
    .bind(kind.as_str())
    .bind(message)
    .bind(link)
    .bind(icon_url)
    .fetch_one(exec)
    .await?;

    map_notification(row)
}

/// Recent notifications for a recipient, newest first
pub async fn list_for_recipient(
    exec: impl PgExecutor<'_>,
    recipient_id: Uuid,
    limit: i64,
) -> Result<Vec<Notification>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, recipient_id, sender_id, kind, message, link, icon_url, is_read, created_at
        FROM notifications
        WHERE recipient_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(recipient_id)
    .bind(limit)
    .fetch_all(exec)
    .await?;

    rows.into_iter().map(map_notification).collect()
}

/// Count of unread notifications.
///
/// Always derived from the table; never maintained as a separate counter
/// that could drift.
pub async fn unread_count(
    exec: impl PgExecutor<'_>,
    recipient_id: Uuid,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count
        FROM notifications
        WHERE recipient_id = $1 AND is_read = FALSE
        "#,
    )
    .bind(recipient_id)
    .fetch_one(exec)
    .await?;

    Ok(row.get("count"))
}

/// Mark one notification read; the recipient filter enforces ownership.
/// Returns false when no matching row exists.
pub async fn mark_read(
    exec: impl PgExecutor<'_>,
    id: Uuid,
    recipient_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1 AND recipient_id = $2
        "#,
    )
    .bind(id)
    .bind(recipient_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Mark all of a recipient's notifications read, returning how many flipped
pub async fn mark_all_read(
    exec: impl PgExecutor<'_>,
    recipient_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE recipient_id = $1 AND is_read = FALSE
        "#,
    )
    .bind(recipient_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected())
}

/// Delete one notification; the recipient filter enforces ownership
pub async fn delete(
    exec: impl PgExecutor<'_>,
    id: Uuid,
    recipient_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM notifications
        WHERE id = $1 AND recipient_id = $2
        "#,
    )
    .bind(id)
    .bind(recipient_id)
    .execute(exec)
    .await?;

    Ok(result.rows_affected() == 1)
}
