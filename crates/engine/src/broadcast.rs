//! Role-filtered announcement fan-out

use std::sync::Arc;

use common::models::Role;
use common::{Error, Result};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::dispatch::{NewNotification, NotificationDispatcher};

/// Outcome of a broadcast run
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BroadcastReport {
    pub notified: usize,
    pub failed: usize,
}

/// Sends one announcement to every user matching a role filter.
///
/// Each recipient gets an independent insert: a failure partway through
/// never requires re-sending to users already notified, and there is no
/// cross-recipient atomicity to roll back.
pub struct Broadcaster {
    pool: PgPool,
    dispatcher: Arc<NotificationDispatcher>,
    chunk_size: usize,
}

impl Broadcaster {
    pub fn new(pool: PgPool, dispatcher: Arc<NotificationDispatcher>, chunk_size: usize) -> Self {
        Self {
            pool,
            dispatcher,
            chunk_size: chunk_size.max(1),
        }
    }

    pub async fn broadcast_to_role(
        &self,
        sender_id: Option<Uuid>,
        role: Option<Role>,
        message: &str,
        link: Option<&str>,
    ) -> Result<BroadcastReport> {
        if message.trim().is_empty() {
            return Err(Error::Validation("broadcast requires a message".into()));
        }

        let recipients = db::users::list_ids_by_role(&self.pool, role)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut notified = 0;
        let mut failed = 0;

        for chunk in recipients.chunks(self.chunk_size) {
            for &recipient in chunk {
                let input = NewNotification::announcement(recipient, sender_id, message, link);
                match self.dispatcher.create_and_emit(&self.pool, input).await {
                    Ok(_) => notified += 1,
                    Err(e) => {
                        warn!(error = %e, %recipient, "broadcast delivery failed");
                        failed += 1;
                    }
                }
            }
            // Let other request handlers interleave between chunks
            tokio::task::yield_now().await;
        }

        info!(notified, failed, "announcement broadcast complete");
        Ok(BroadcastReport { notified, failed })
    }
}
