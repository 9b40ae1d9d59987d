//! Job draft entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the job_drafts table.
///
/// The form snapshot is stored as jsonb exactly as buffered by the editor;
/// it is re-validated against the form schema when loaded.
#[derive(Debug, Clone, FromRow)]
pub struct JobDraftEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub location_id: Option<Uuid>,
    pub current_tab: String,
    pub form_snapshot: serde_json::Value,
    pub job_number: Option<String>,
    pub needs_reconciliation: bool,
    pub updated_at: DateTime<Utc>,
}

impl JobDraftEntity {
    /// Convert to domain model.
    pub fn into_domain(self) -> domain::models::JobDraft {
        domain::models::JobDraft {
            id: self.id,
            owner_id: self.owner_id,
            location_id: self.location_id,
            current_tab: self.current_tab,
            form_snapshot: self.form_snapshot,
            job_number: self.job_number,
            needs_reconciliation: self.needs_reconciliation,
            updated_at: self.updated_at,
        }
    }
}
