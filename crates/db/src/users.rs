//! User queries

use chrono::{DateTime, Utc};
use common::models::{GameState, Role, User};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgExecutor, Row};
use uuid::Uuid;

fn parse_role(s: &str) -> Result<Role, sqlx::Error> {
    Role::parse(s).ok_or_else(|| sqlx::Error::Decode(format!("unknown role: {s}").into()))
}

fn map_user(row: PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        avatar_url: row.get("avatar_url"),
        role: parse_role(row.get("role"))?,
        points: row.get("points"),
        level: row.get("level"),
        last_check_in_at: row.get("last_check_in_at"),
        current_streak: row.get("current_streak"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Get or create a user by username
pub async fn upsert(
    exec: impl PgExecutor<'_>,
    username: &str,
    avatar_url: Option<&str>,
) -> Result<User, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO users (id, username, avatar_url, role, points, level, current_streak, created_at, updated_at)
        VALUES ($1, $2, $3, 'user', 0, 1, 0, NOW(), NOW())
        ON CONFLICT (username) DO UPDATE
        SET avatar_url = EXCLUDED.avatar_url,
            updated_at = NOW()
        RETURNING id, username, avatar_url, role, points, level, last_check_in_at,
                  current_streak, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(avatar_url)
    .fetch_one(exec)
    .await?;

    map_user(row)
}

/// Get user by ID
pub async fn get_by_id(exec: impl PgExecutor<'_>, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, username, avatar_url, role, points, level, last_check_in_at,
               current_streak, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(exec)
    .await?;

    row.map(map_user).transpose()
}

/// Read a user's gamification state under a row lock.
///
/// Must run inside a transaction; the lock is held until that transaction
/// commits or rolls back, which serializes concurrent check-ins per user.
pub async fn game_state_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<GameState>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT points, level, last_check_in_at, current_streak
        FROM users
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|r| GameState {
        points: r.get("points"),
        level: r.get("level"),
        last_check_in_at: r.get("last_check_in_at"),
        current_streak: r.get("current_streak"),
    }))
}

/// Write the full outcome of an accepted check-in
pub async fn apply_check_in(
    conn: &mut PgConnection,
    id: Uuid,
    points: i64,
    level: i32,
    streak: i32,
    checked_in_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET points = $2,
            level = $3,
            current_streak = $4,
            last_check_in_at = $5,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(points)
    .bind(level)
    .bind(streak)
    .bind(checked_in_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Write an updated points total and its recomputed level
pub async fn set_points(
    exec: impl PgExecutor<'_>,
    id: Uuid,
    points: i64,
    level: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE users
        SET points = $2,
            level = $3,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(points)
    .bind(level)
    .execute(exec)
    .await?;

    Ok(())
}

/// List user ids, optionally restricted to a role
pub async fn list_ids_by_role(
    exec: impl PgExecutor<'_>,
    role: Option<Role>,
) -> Result<Vec<Uuid>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id FROM users
        WHERE ($1::text IS NULL OR role = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(role.map(|r| r.as_str()))
    .fetch_all(exec)
    .await?;

    Ok(rows.into_iter().map(|r| r.get("id")).collect())
}
