//! Draft finalization.
//!
//! Converts a draft into an immutable job row. Preconditions run in a
//! fixed order so the caller always learns the earliest user-fixable
//! problem: persisted draft, real job number (allocated on demand when the
//! draft still lacks one), customer name, resolvable location. The job row
//! is inserted before the draft row is deleted, and a failed delete is
//! logged only; the orphaned draft is picked up by the stale-draft sweep.

use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};

use domain::models::job::JobRecord;
use domain::models::job_number::JobNumberSlot;
use domain::services::{assemble_job, ValidationError};
use persistence::repositories::{JobDraftRepository, JobRepository, LocationRepository};

use crate::middleware::metrics::record_job_finalized;
use crate::services::autosave::{DraftEditor, SaveError};
use crate::services::numbering::{AllocationError, NumberingService};

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("draft has no saved content to finalize")]
    DraftNotPersisted,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub struct FinalizationCoordinator {
    drafts: JobDraftRepository,
    jobs: JobRepository,
    locations: LocationRepository,
    numbering: NumberingService,
}

impl FinalizationCoordinator {
    pub fn new(pool: PgPool) -> Self {
        Self {
            drafts: JobDraftRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            locations: LocationRepository::new(pool.clone()),
            numbering: NumberingService::new(pool),
        }
    }

    pub async fn finalize(&self, editor: &DraftEditor) -> Result<JobRecord, FinalizeError> {
        // The draft row must exist and reflect the latest buffer state.
        let draft_id = editor
            .flush()
            .await?
            .ok_or(FinalizeError::DraftNotPersisted)?;
        let mut state = editor.state();

        let location = match state.location_id {
            Some(id) => self
                .locations
                .find_by_id(id)
                .await?
                .map(|entity| entity.into_domain()),
            None => None,
        };

        // A placeholder never satisfies the number precondition; the draft
        // must carry a real allocation before it can become a job.
        let number = match state.job_number.as_ref().and_then(JobNumberSlot::assigned) {
            Some(number) => *number,
            None => match &location {
                Some(location) => {
                    let number = self.numbering.allocate(location).await?;
                    state = editor.set_number(JobNumberSlot::Assigned(number), false);
                    // Persist the allocation now so no debounced write is
                    // left racing the draft delete below.
                    editor.flush().await?;
                    number
                }
                None => {
                    // Allocation cannot run without a location; report the
                    // earliest missing field instead of a numbering error.
                    if state.form_snapshot.effective_customer_name().is_none() {
                        return Err(ValidationError::new("customerName").into());
                    }
                    return Err(ValidationError::new("locationId").into());
                }
            },
        };

        let new_job = assemble_job(&state, number, location.as_ref(), state.owner_id)?;

        let entity = self.jobs.insert(&new_job).await?;
        record_job_finalized();
        info!(
            job_id = %entity.id,
            job_number = %entity.job_number,
            "Draft finalized into submitted job"
        );

        if let Err(err) = self.drafts.delete(draft_id).await {
            warn!(
                draft_id = %draft_id,
                error = %err,
                "Draft cleanup failed after finalization; leaving row for stale sweep"
            );
        }

        Ok(entity.into_domain())
    }
}
