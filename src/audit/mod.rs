//! Append-only record of admin mutations and check-ins.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

#[derive(Debug)]
pub enum AuditError {
    DbError(sqlx::Error),
}

impl From<sqlx::Error> for AuditError {
    fn from(err: sqlx::Error) -> Self {
        AuditError::DbError(err)
    }
}

impl std::fmt::Display for AuditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditError::DbError(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for AuditError {}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AuditEntry {
    pub id: i64,
    pub user_id: Option<i64>,
    pub username: String,
    pub action: String,
    pub target_type: String,
    pub target_id: i64,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn created_local(&self) -> String {
        self.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Write one entry. `user_id` is `None` for public actions such as check-in.
pub async fn log(
    pool: &PgPool,
    user_id: Option<i64>,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> Result<(), AuditError> {
    sqlx::query(
        "INSERT INTO audit_log (user_id, action, target_type, target_id, details) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(action)
    .bind(target_type)
    .bind(target_id)
    .bind(details)
    .execute(pool)
    .await?;
    Ok(())
}

/// Like [`log`], but a failure is only logged.
pub async fn record(
    pool: &PgPool,
    user_id: Option<i64>,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) {
    if let Err(e) = log(pool, user_id, action, target_type, target_id, details).await {
        log::warn!("Audit entry {action} for {target_type} {target_id} not written: {e}");
    }
}

/// Most recent entries, newest first.
pub async fn find_recent(pool: &PgPool, limit: i64) -> Result<Vec<AuditEntry>, sqlx::Error> {
    sqlx::query_as::<_, AuditEntry>(
        "SELECT a.id, a.user_id, COALESCE(u.username, 'public') AS username, \
                a.action, a.target_type, a.target_id, \
                COALESCE(a.details->>'summary', '') AS summary, a.created_at \
         FROM audit_log a \
         LEFT JOIN users u ON u.id = a.user_id \
         ORDER BY a.created_at DESC, a.id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}
