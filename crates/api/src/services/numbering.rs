//! Job number allocation.
//!
//! Numbers are issued from the per-facility sequence counter at the moment
//! a draft's location is chosen, not at finalization, so the inspector sees
//! the real number while still filling in the form. When the counter is
//! unreachable the draft proceeds under a placeholder number flagged for
//! manual reconciliation; finalization has no such fallback.

use sqlx::PgPool;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use domain::models::job_number::{JobNumber, JobNumberSlot};
use domain::models::location::Location;
use persistence::repositories::SequenceRepository;

use crate::middleware::metrics::record_placeholder_number;

/// The sequence counter could not issue a number.
#[derive(Debug, Error)]
#[error("sequence allocation failed for facility {facility_code}: {source}")]
pub struct AllocationError {
    pub facility_code: i32,
    #[source]
    source: sqlx::Error,
}

pub struct NumberingService {
    sequences: SequenceRepository,
}

impl NumberingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sequences: SequenceRepository::new(pool),
        }
    }

    /// Issues the next number for the location's facility. Strict: no
    /// placeholder fallback, used by finalization.
    pub async fn allocate(&self, location: &Location) -> Result<JobNumber, AllocationError> {
        let sequence = self
            .sequences
            .next_sequence(location.facility_code)
            .await
            .map_err(|source| AllocationError {
                facility_code: location.facility_code,
                source,
            })?;
        Ok(JobNumber::first_revision(
            i64::from(location.facility_code),
            sequence,
        ))
    }

    /// Allocation at location-selection time. On counter failure the draft
    /// gets a placeholder slot and carries on; the second element reports
    /// whether reconciliation is now needed.
    pub async fn allocate_or_placeholder(
        &self,
        location: &Location,
        editor_id: Uuid,
    ) -> (JobNumberSlot, bool) {
        match self.allocate(location).await {
            Ok(number) => (JobNumberSlot::Assigned(number), false),
            Err(err) => {
                warn!(
                    facility_code = location.facility_code,
                    error = %err,
                    "Sequence allocation failed; assigning placeholder number"
                );
                record_placeholder_number();
                let draft_ref = editor_id.simple().to_string();
                (
                    JobNumberSlot::placeholder(
                        i64::from(location.facility_code),
                        &draft_ref[..8],
                    ),
                    true,
                )
            }
        }
    }
}
