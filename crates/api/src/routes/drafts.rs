//! Draft editing endpoints.
//!
//! A draft is edited through a server-side editor session. Opening a draft
//! returns an `editorId`; mutations are buffered and persisted by the
//! autosave scheduler, so a PATCH acknowledges with 202 before the write
//! lands. The `draftId` in responses is the resumable reference captured
//! from the first successful save.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use domain::models::draft::{
    DraftState, DraftStateResponse, SetTabRequest, UpdateDraftRequest,
};
use domain::models::job::JobRecord;
use domain::models::job_number::JobNumberSlot;
use domain::models::personnel::{CandidateQuery, RankedCandidate};
use domain::models::session::Session;
use domain::models::snapshot::FormSnapshot;
use domain::services::rank_candidates;
use persistence::repositories::{
    JobDraftRepository, LocationRepository, PersonnelRepository,
};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::session::SessionExtractor;
use crate::services::autosave::DraftEditor;
use crate::services::finalize::FinalizationCoordinator;
use crate::services::numbering::NumberingService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraftResponse {
    pub draft: DraftStateResponse,
    /// Pre-fetched staffing candidates when the draft already has a
    /// location, so the client does not need a second round trip.
    pub candidates: Vec<RankedCandidate>,
}

/// POST /api/v1/drafts
///
/// Opens a fresh editor session. Nothing is persisted until the form
/// passes the minimum-content bar.
pub async fn open_draft(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
) -> (StatusCode, Json<DraftStateResponse>) {
    let editor = DraftEditor::open(session.user_id, state.draft_saver(), state.debounce());
    state.editors.insert(editor.clone());
    info!(editor_id = %editor.editor_id, user_id = %session.user_id, "Draft editor opened");
    (StatusCode::CREATED, Json(editor_response(&state, &editor, None)))
}

/// GET /api/v1/drafts/:editor_id
pub async fn get_draft(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(editor_id): Path<Uuid>,
) -> Result<Json<DraftStateResponse>, ApiError> {
    let editor = editor_for(&state, &session, editor_id)?;
    Ok(Json(editor_response(&state, &editor, None)))
}

/// PATCH /api/v1/drafts/:editor_id
///
/// Applies a form mutation to the editor buffer and schedules a debounced
/// save. Choosing a location also triggers job number allocation; if the
/// sequence counter is down the draft continues under a placeholder and
/// the response carries a warning.
pub async fn update_draft(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(editor_id): Path<Uuid>,
    Json(request): Json<UpdateDraftRequest>,
) -> Result<(StatusCode, Json<DraftStateResponse>), ApiError> {
    let editor = editor_for(&state, &session, editor_id)?;

    let snapshot = request
        .form_snapshot
        .as_ref()
        .map(FormSnapshot::parse)
        .transpose()
        .map_err(|err| ApiError::Validation(format!("Malformed form snapshot: {err}")))?;

    if let Some(location_id) = request.location_id {
        // Reject unknown locations before they reach the buffer.
        LocationRepository::new(state.pool.clone())
            .find_by_id(location_id)
            .await?
            .ok_or_else(|| ApiError::Validation("Unknown location".into()))?;
    }

    editor.apply_update(snapshot, request.location_id);

    // First location pick allocates the job number.
    let mut warning = None;
    let current = editor.state();
    if let (Some(location_id), None) = (current.location_id, &current.job_number) {
        warning = allocate_number(&state, &editor, location_id).await?;
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(editor_response(&state, &editor, warning)),
    ))
}

/// POST /api/v1/drafts/:editor_id/tab
///
/// Switches the active tab; this flushes the buffer immediately instead of
/// waiting for the debounce window.
pub async fn set_tab(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(editor_id): Path<Uuid>,
    Json(request): Json<SetTabRequest>,
) -> Result<Json<DraftStateResponse>, ApiError> {
    request.validate()?;
    let editor = editor_for(&state, &session, editor_id)?;

    if let Err(err) = editor.change_tab(request.tab).await {
        // The tab switch itself still succeeds; the save failure is
        // surfaced through the degraded flag.
        warn!(editor_id = %editor_id, error = %err, "Flush on tab change failed");
    }

    Ok(Json(editor_response(&state, &editor, None)))
}

/// POST /api/v1/drafts/resume/:draft_id
///
/// Reopens a persisted draft after a reload or on another workstation. If
/// a live editor already tracks the draft it is returned instead of
/// spawning a duplicate. The response includes ranked staffing candidates
/// when the draft has a location.
pub async fn resume_draft(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(draft_id): Path<Uuid>,
) -> Result<Json<ResumeDraftResponse>, ApiError> {
    let editor = match state.editors.find_by_draft_id(draft_id) {
        Some(editor) => {
            check_owner(&session, editor.owner_id)?;
            editor
        }
        None => {
            let row = JobDraftRepository::new(state.pool.clone())
                .find_by_id(draft_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Draft not found".into()))?
                .into_domain();
            check_owner(&session, row.owner_id)?;

            let form_snapshot = FormSnapshot::parse(&row.form_snapshot).map_err(|err| {
                ApiError::Internal(format!("Stored draft snapshot is corrupt: {err}"))
            })?;
            let job_number = row
                .job_number
                .as_deref()
                .map(JobNumberSlot::from_stored)
                .transpose()?;

            let restored = DraftState {
                owner_id: row.owner_id,
                location_id: row.location_id,
                current_tab: row.current_tab,
                form_snapshot,
                job_number,
                needs_reconciliation: row.needs_reconciliation,
            };
            let editor =
                DraftEditor::resume(restored, row.id, state.draft_saver(), state.debounce());
            state.editors.insert(editor.clone());
            info!(editor_id = %editor.editor_id, draft_id = %draft_id, "Draft resumed");
            editor
        }
    };

    let candidates = match editor.state().location_id {
        Some(location_id) => {
            let pool: Vec<_> = PersonnelRepository::new(state.pool.clone())
                .list_assignable()
                .await?
                .into_iter()
                .map(|entity| entity.into_domain())
                .collect();
            rank_candidates(location_id, pool, &CandidateQuery::default())
        }
        None => Vec::new(),
    };

    Ok(Json(ResumeDraftResponse {
        draft: editor_response(&state, &editor, None),
        candidates,
    }))
}

/// POST /api/v1/drafts/:editor_id/finalize
///
/// Converts the draft into an immutable submitted job and retires the
/// editor session.
pub async fn finalize_draft(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(editor_id): Path<Uuid>,
) -> Result<(StatusCode, Json<JobRecord>), ApiError> {
    let editor = editor_for(&state, &session, editor_id)?;

    let job = FinalizationCoordinator::new(state.pool.clone())
        .finalize(&editor)
        .await?;

    editor.close();
    state.editors.remove(editor_id);

    Ok((StatusCode::CREATED, Json(job)))
}

/// DELETE /api/v1/drafts/:editor_id
///
/// Closes the editor session. The persisted draft row, if any, stays
/// resumable.
pub async fn close_draft(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Path(editor_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let editor = editor_for(&state, &session, editor_id)?;
    editor.close();
    state.editors.remove(editor_id);
    Ok(StatusCode::NO_CONTENT)
}

fn editor_for(
    state: &AppState,
    session: &Session,
    editor_id: Uuid,
) -> Result<Arc<DraftEditor>, ApiError> {
    let editor = state
        .editors
        .get(editor_id)
        .ok_or_else(|| ApiError::NotFound("Draft editor not found".into()))?;
    check_owner(session, editor.owner_id)?;
    Ok(editor)
}

fn check_owner(session: &Session, owner_id: Uuid) -> Result<(), ApiError> {
    if !session.can_access_draft(owner_id) {
        return Err(ApiError::Forbidden(
            "Draft belongs to another user".into(),
        ));
    }
    Ok(())
}

async fn allocate_number(
    state: &AppState,
    editor: &DraftEditor,
    location_id: Uuid,
) -> Result<Option<String>, ApiError> {
    let location = LocationRepository::new(state.pool.clone())
        .find_by_id(location_id)
        .await?
        .ok_or_else(|| ApiError::Validation("Unknown location".into()))?
        .into_domain();

    let numbering = NumberingService::new(state.pool.clone());
    let (slot, placeholder) = numbering
        .allocate_or_placeholder(&location, editor.editor_id)
        .await;
    editor.set_number(slot, placeholder);

    Ok(placeholder.then(|| {
        "Job numbering is temporarily unavailable; a placeholder number was assigned and is \
         flagged for reconciliation"
            .to_string()
    }))
}

fn editor_response(
    state: &AppState,
    editor: &DraftEditor,
    warning: Option<String>,
) -> DraftStateResponse {
    let current = editor.state();
    let status = editor.status();
    DraftStateResponse {
        editor_id: editor.editor_id,
        draft_id: status.draft_id,
        owner_id: current.owner_id,
        location_id: current.location_id,
        current_tab: current.current_tab,
        form_snapshot: current.form_snapshot.to_value(),
        job_number: current.job_number.map(|slot| slot.to_string()),
        needs_reconciliation: current.needs_reconciliation,
        last_saved_at: status.last_saved_at,
        save_degraded: status.consecutive_failures
            >= state.config.autosave.failure_warning_threshold,
        warning,
    }
}
