//! Job endpoints: lookup, status transitions, staffing and revision.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use domain::models::draft::DraftState;
use domain::models::job::{JobRecord, UpdateStatusRequest};
use domain::models::job_number::JobNumber;
use domain::models::personnel::{CandidateQuery, RankedCandidate, StaffRole};
use domain::services::AssignmentSelection;
use persistence::repositories::{
    DraftInput, JobDraftRepository, JobRepository, PersonnelRepository,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::session::SessionExtractor;

/// GET /api/v1/jobs/:job_id
pub async fn get_job(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRecord>, ApiError> {
    let job = find_job(&state, job_id).await?;
    Ok(Json(job))
}

/// PATCH /api/v1/jobs/:job_id/status
///
/// Moves the job along the status state machine. Illegal transitions are
/// rejected; `on-hold` and `needs-review` allow a return to `in-progress`.
pub async fn update_status(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Path(job_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<JobRecord>, ApiError> {
    let mut job = find_job(&state, job_id).await?;

    if !job.status.can_transition_to(request.status) {
        return Err(ApiError::Validation(format!(
            "Invalid status transition: {} -> {}",
            job.status.as_str(),
            request.status.as_str()
        )));
    }

    JobRepository::new(state.pool.clone())
        .update_status(job_id, request.status.as_str())
        .await?;
    info!(
        job_id = %job_id,
        from = job.status.as_str(),
        to = request.status.as_str(),
        "Job status updated"
    );

    job.status = request.status;
    Ok(Json(job))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesResponse {
    pub candidates: Vec<RankedCandidate>,
}

/// GET /api/v1/jobs/:job_id/candidates
///
/// Ranked staffing candidates for the job's location. Filters and ranking
/// mode come from the query string.
pub async fn list_candidates(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Path(job_id): Path<Uuid>,
    Query(query): Query<CandidateQuery>,
) -> Result<Json<CandidatesResponse>, ApiError> {
    let job = find_job(&state, job_id).await?;
    let pool: Vec<_> = PersonnelRepository::new(state.pool.clone())
        .list_assignable()
        .await?
        .into_iter()
        .map(|entity| entity.into_domain())
        .collect();
    let candidates = domain::services::rank_candidates(job.location_id, pool, &query);
    Ok(Json(CandidatesResponse { candidates }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffRequest {
    pub personnel_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub inspector_ids: Vec<Uuid>,
    pub supervisor_ids: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_inspector_id: Option<Uuid>,
    pub location_mismatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// POST /api/v1/jobs/:job_id/assignments
///
/// Assigns an inspector or supervisor. Unavailable staff are rejected
/// outright; staff based at another facility are assigned with a warning,
/// never silently blocked.
pub async fn assign_staff(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Path(job_id): Path<Uuid>,
    Json(request): Json<AssignStaffRequest>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let job = find_job(&state, job_id).await?;
    let profile = PersonnelRepository::new(state.pool.clone())
        .find_by_id(request.personnel_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Personnel not found".into()))?
        .into_domain();

    let mut selection = AssignmentSelection::new(job.inspector_ids, job.supervisor_ids);
    let outcome = selection.assign(&profile, job.location_id)?;

    JobRepository::new(state.pool.clone())
        .update_assignments(job_id, &selection.inspector_ids, &selection.supervisor_ids)
        .await?;
    info!(
        job_id = %job_id,
        personnel_id = %profile.id,
        primary = outcome.primary,
        "Staff assigned"
    );

    let warning = outcome.location_mismatch.then(|| {
        format!(
            "{} is based at a different facility than this job",
            profile.name
        )
    });

    Ok(Json(AssignmentResponse {
        primary_inspector_id: selection.primary_inspector(),
        inspector_ids: selection.inspector_ids,
        supervisor_ids: selection.supervisor_ids,
        location_mismatch: outcome.location_mismatch,
        warning,
    }))
}

/// DELETE /api/v1/jobs/:job_id/assignments/:personnel_id
///
/// Removes an assignment. Removing the primary inspector promotes the next
/// selected inspector automatically.
pub async fn unassign_staff(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Path((job_id, personnel_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AssignmentResponse>, ApiError> {
    let job = find_job(&state, job_id).await?;

    let mut selection = AssignmentSelection::new(job.inspector_ids, job.supervisor_ids);
    let removed = selection.unassign(personnel_id, StaffRole::Inspector)
        || selection.unassign(personnel_id, StaffRole::Supervisor);
    if !removed {
        return Err(ApiError::NotFound(
            "Personnel is not assigned to this job".into(),
        ));
    }

    JobRepository::new(state.pool.clone())
        .update_assignments(job_id, &selection.inspector_ids, &selection.supervisor_ids)
        .await?;
    info!(job_id = %job_id, personnel_id = %personnel_id, "Staff unassigned");

    Ok(Json(AssignmentResponse {
        primary_inspector_id: selection.primary_inspector(),
        inspector_ids: selection.inspector_ids,
        supervisor_ids: selection.supervisor_ids,
        location_mismatch: false,
        warning: None,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviseJobResponse {
    pub draft_id: Uuid,
    pub job_number: String,
}

/// POST /api/v1/jobs/:job_id/revise
///
/// Opens a revision draft seeded from the job's snapshot. The revision
/// number comes straight from the jobs table (max revision + 1), not from
/// the sequence allocator; the unique index on (facility, sequence,
/// revision) resolves concurrent revisions.
pub async fn revise_job(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(job_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ReviseJobResponse>), ApiError> {
    let job = find_job(&state, job_id).await?;

    let revision = JobRepository::new(state.pool.clone())
        .next_revision(job.facility_code, job.sequence)
        .await?;
    let number = JobNumber {
        facility_code: i64::from(job.facility_code),
        sequence: job.sequence,
        revision: i64::from(revision),
    };

    let input = DraftInput {
        owner_id: session.user_id,
        location_id: Some(job.location_id),
        current_tab: DraftState::DEFAULT_TAB.to_string(),
        form_snapshot: job.form_snapshot.clone(),
        job_number: Some(number.to_string()),
        needs_reconciliation: false,
    };
    let draft_id = JobDraftRepository::new(state.pool.clone())
        .insert(&input)
        .await?;
    info!(
        job_id = %job_id,
        draft_id = %draft_id,
        job_number = %number,
        "Revision draft created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ReviseJobResponse {
            draft_id,
            job_number: number.to_string(),
        }),
    ))
}

async fn find_job(state: &AppState, job_id: Uuid) -> Result<JobRecord, ApiError> {
    Ok(JobRepository::new(state.pool.clone())
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".into()))?
        .into_domain())
}
