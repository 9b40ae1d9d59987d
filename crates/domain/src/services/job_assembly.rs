//! Field-priority resolver assembling a submitted job from a draft.
//!
//! A draft accumulates data in several possibly-present places (the typed
//! customer block, legacy flat snapshot fields, the resolved location row).
//! Rather than merging optionals ad hoc, every output field is resolved
//! here with one explicit precedence order, producing a fully-typed
//! [`NewJob`] or a [`ValidationError`] naming the first missing required
//! field.
//!
//! Precedence per field:
//! - `customer_name`: snapshot `customer.name`, else legacy flat
//!   `customerName`. Required.
//! - `customer_contact`: snapshot `customer.contact`, else legacy flat
//!   `customerContact`. Optional.
//! - `location_id` / `location_name`: the resolved location row. Required.
//! - `form_snapshot`: the draft's latest snapshot, stored verbatim.
//! - `status`: always `submitted`; finalization produces nothing else.

use thiserror::Error;
use uuid::Uuid;

use crate::models::draft::DraftState;
use crate::models::job::{JobStatus, NewJob};
use crate::models::job_number::JobNumber;
use crate::models::location::Location;

/// A required field was missing at finalize time.
///
/// Reported inline against the named field; fully recoverable by user
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field: {field}")]
pub struct ValidationError {
    pub field: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

/// Resolves a draft into the immutable insert payload for a job row.
///
/// Checks are ordered to match the finalize preconditions: customer name
/// before location, so the first user-fixable failure wins.
pub fn assemble_job(
    draft: &DraftState,
    number: JobNumber,
    location: Option<&Location>,
    created_by: Uuid,
) -> Result<NewJob, ValidationError> {
    let customer_name = draft
        .form_snapshot
        .effective_customer_name()
        .ok_or(ValidationError::new("customerName"))?
        .to_string();

    let location = location.ok_or(ValidationError::new("locationId"))?;

    let customer_contact = draft
        .form_snapshot
        .effective_customer_contact()
        .map(str::to_string);

    Ok(NewJob {
        number,
        location_id: location.id,
        location_name: location.display_name.clone(),
        customer_name,
        customer_contact,
        status: JobStatus::Submitted,
        form_snapshot: draft.form_snapshot.to_value(),
        created_by,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::CustomerInfo;
    use chrono::Utc;

    fn test_location() -> Location {
        Location {
            id: Uuid::new_v4(),
            display_name: "Plant 16 - Greenville".to_string(),
            facility_code: 16,
            address: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn named_draft(name: &str) -> DraftState {
        let mut draft = DraftState::new(Uuid::new_v4());
        draft.form_snapshot.customer = CustomerInfo {
            name: Some(name.to_string()),
            ..Default::default()
        };
        draft
    }

    #[test]
    fn test_assembles_submitted_job() {
        let location = test_location();
        let mut draft = named_draft("Acme Industries");
        draft.location_id = Some(location.id);
        let number = JobNumber::first_revision(16, 1);
        let creator = Uuid::new_v4();

        let job = assemble_job(&draft, number, Some(&location), creator).unwrap();
        assert_eq!(job.customer_name, "Acme Industries");
        assert_eq!(job.location_name, "Plant 16 - Greenville");
        assert_eq!(job.status, JobStatus::Submitted);
        assert_eq!(job.number.to_string(), "16-1-1");
        assert_eq!(job.created_by, creator);
    }

    #[test]
    fn test_missing_customer_name_wins_over_missing_location() {
        let draft = DraftState::new(Uuid::new_v4());
        let err = assemble_job(&draft, JobNumber::first_revision(16, 1), None, Uuid::new_v4())
            .unwrap_err();
        assert_eq!(err.field, "customerName");
    }

    #[test]
    fn test_missing_location_reported_after_customer() {
        let draft = named_draft("Acme");
        let err = assemble_job(&draft, JobNumber::first_revision(16, 1), None, Uuid::new_v4())
            .unwrap_err();
        assert_eq!(err.field, "locationId");
    }

    #[test]
    fn test_legacy_flat_customer_fields_are_fallbacks() {
        let location = test_location();
        let mut draft = DraftState::new(Uuid::new_v4());
        draft.form_snapshot.customer_name = Some("Legacy Acme".to_string());
        draft.form_snapshot.customer_contact = Some("555-0117".to_string());

        let job = assemble_job(
            &draft,
            JobNumber::first_revision(16, 2),
            Some(&location),
            Uuid::new_v4(),
        )
        .unwrap();
        assert_eq!(job.customer_name, "Legacy Acme");
        assert_eq!(job.customer_contact.as_deref(), Some("555-0117"));
    }

    #[test]
    fn test_typed_customer_block_wins_over_legacy() {
        let location = test_location();
        let mut draft = named_draft("Typed Acme");
        draft.form_snapshot.customer_name = Some("Legacy Acme".to_string());

        let job = assemble_job(
            &draft,
            JobNumber::first_revision(16, 3),
            Some(&location),
            Uuid::new_v4(),
        )
        .unwrap();
        assert_eq!(job.customer_name, "Typed Acme");
    }
}
