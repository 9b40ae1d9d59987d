//! Stale draft cleanup.
//!
//! Drafts abandoned mid-edit (and the rare orphan left behind when a
//! post-finalization delete fails) are swept once their last update falls
//! outside the configured retention window.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use persistence::repositories::JobDraftRepository;

use super::scheduler::{Job, JobFrequency};
use crate::config::CleanupConfig;

pub struct StaleDraftSweep {
    drafts: JobDraftRepository,
    retention_hours: i64,
    sweep_interval_minutes: u64,
}

impl StaleDraftSweep {
    pub fn new(pool: PgPool, config: &CleanupConfig) -> Self {
        Self {
            drafts: JobDraftRepository::new(pool),
            retention_hours: config.stale_draft_hours,
            sweep_interval_minutes: config.sweep_interval_minutes,
        }
    }
}

#[async_trait::async_trait]
impl Job for StaleDraftSweep {
    fn name(&self) -> &'static str {
        "stale_draft_sweep"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(self.sweep_interval_minutes)
    }

    async fn execute(&self) -> Result<(), String> {
        let cutoff = Utc::now() - Duration::hours(self.retention_hours);
        let deleted = self
            .drafts
            .delete_stale(cutoff)
            .await
            .map_err(|e| format!("stale draft sweep failed: {e}"))?;
        if deleted > 0 {
            info!(deleted, retention_hours = self.retention_hours, "Swept stale drafts");
        }
        Ok(())
    }
}
