//! Job entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use domain::models::JobStatus;

/// Database row mapping for the jobs table.
#[derive(Debug, Clone, FromRow)]
pub struct JobEntity {
    pub id: Uuid,
    pub job_number: String,
    pub facility_code: i32,
    pub sequence: i64,
    pub revision: i32,
    pub location_id: Uuid,
    pub location_name: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub status: String,
    pub inspector_ids: Vec<Uuid>,
    pub supervisor_ids: Vec<Uuid>,
    pub form_snapshot: serde_json::Value,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobEntity {
    /// Convert to domain model.
    ///
    /// An unrecognized stored status falls back to `Submitted` with a
    /// warning rather than failing the whole row.
    pub fn into_domain(self) -> domain::models::JobRecord {
        let status = self.status.parse::<JobStatus>().unwrap_or_else(|_| {
            warn!(
                job_id = %self.id,
                status = %self.status,
                "Unrecognized job status in database; falling back to submitted"
            );
            JobStatus::Submitted
        });

        domain::models::JobRecord {
            id: self.id,
            job_number: self.job_number,
            facility_code: self.facility_code,
            sequence: self.sequence,
            revision: self.revision,
            location_id: self.location_id,
            location_name: self.location_name,
            customer_name: self.customer_name,
            customer_contact: self.customer_contact,
            status,
            inspector_ids: self.inspector_ids,
            supervisor_ids: self.supervisor_ids,
            form_snapshot: self.form_snapshot,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_with_status(status: &str) -> JobEntity {
        JobEntity {
            id: Uuid::new_v4(),
            job_number: "16-42-1".to_string(),
            facility_code: 16,
            sequence: 42,
            revision: 1,
            location_id: Uuid::new_v4(),
            location_name: "North Plant".to_string(),
            customer_name: "Acme".to_string(),
            customer_contact: None,
            status: status.to_string(),
            inspector_ids: vec![],
            supervisor_ids: vec![],
            form_snapshot: serde_json::json!({}),
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_status_maps_to_domain() {
        let record = entity_with_status("in-progress").into_domain();
        assert_eq!(record.status, JobStatus::InProgress);
    }

    #[test]
    fn test_unrecognized_stored_status_falls_back_to_submitted() {
        let record = entity_with_status("totally-bogus").into_domain();
        assert_eq!(record.status, JobStatus::Submitted);
    }
}
