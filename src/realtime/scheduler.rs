use std::time::Duration;

use sqlx::PgPool;

use super::{notify_status_changed, Hub};
use crate::models::meeting::{self, local_now};

/// Periodically write derived statuses back and announce the ones that moved.
pub fn spawn_scheduler(pool: PgPool, hub: Hub, every_secs: u64) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(every_secs.max(1)));
        loop {
            interval.tick().await;
            match meeting::refresh_statuses(&pool, local_now()).await {
                Ok(changed) => {
                    if !changed.is_empty() {
                        log::info!("Status scheduler: {} meeting(s) changed status", changed.len());
                    }
                    for (id, status) in changed {
                        notify_status_changed(&hub, id, status);
                    }
                }
                Err(e) => log::error!("Status scheduler: refresh failed: {}", e),
            }
        }
    });
}
