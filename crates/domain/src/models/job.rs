//! Job record domain model and status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::job_number::JobNumber;

// ============================================================================
// Job Status State Machine
// ============================================================================

/// Lifecycle status of a finalized job.
///
/// Finalization only ever produces `Submitted`; every later transition is
/// driven by external workflow actions and must pass
/// [`JobStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Submitted,
    InProgress,
    Completed,
    OnHold,
    NeedsReview,
    Rejected,
}

impl JobStatus {
    /// Returns the string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "submitted",
            JobStatus::InProgress => "in-progress",
            JobStatus::Completed => "completed",
            JobStatus::OnHold => "on-hold",
            JobStatus::NeedsReview => "needs-review",
            JobStatus::Rejected => "rejected",
        }
    }

    /// Check if transition to target state is valid.
    ///
    /// `on-hold` and `needs-review` are recoverable back to `in-progress`;
    /// `completed` and `rejected` are terminal.
    pub fn can_transition_to(&self, target: JobStatus) -> bool {
        matches!(
            (self, target),
            (JobStatus::Submitted, JobStatus::InProgress)
                | (JobStatus::InProgress, JobStatus::Completed)
                | (JobStatus::InProgress, JobStatus::OnHold)
                | (JobStatus::InProgress, JobStatus::NeedsReview)
                | (JobStatus::InProgress, JobStatus::Rejected)
                | (JobStatus::OnHold, JobStatus::InProgress)
                | (JobStatus::NeedsReview, JobStatus::InProgress)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Rejected)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(JobStatus::Submitted),
            "in-progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "on-hold" => Ok(JobStatus::OnHold),
            "needs-review" => Ok(JobStatus::NeedsReview),
            "rejected" => Ok(JobStatus::Rejected),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

// ============================================================================
// Core Model
// ============================================================================

/// An immutable submitted job.
///
/// The job number and location never change once the record is created;
/// only status and staffing are updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Uuid,
    pub job_number: String,
    pub facility_code: i32,
    pub sequence: i64,
    pub revision: i32,
    pub location_id: Uuid,
    pub location_name: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_contact: Option<String>,
    pub status: JobStatus,
    /// Assigned inspectors in selection order; the head is the primary.
    pub inspector_ids: Vec<Uuid>,
    pub supervisor_ids: Vec<Uuid>,
    pub form_snapshot: serde_json::Value,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// The primary inspector is the first one selected, if any.
    pub fn primary_inspector(&self) -> Option<Uuid> {
        self.inspector_ids.first().copied()
    }
}

/// Insert payload for a new job, produced by the field-priority resolver.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub number: JobNumber,
    pub location_id: Uuid,
    pub location_name: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub status: JobStatus,
    pub form_snapshot: serde_json::Value,
    pub created_by: Uuid,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for a job status transition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: JobStatus,
}
