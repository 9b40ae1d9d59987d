//! Staffing pool endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use domain::models::personnel::{CandidateQuery, RankedCandidate, RankingMode};
use domain::services::rank_candidates;
use persistence::repositories::PersonnelRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::session::SessionExtractor;
use crate::routes::jobs::CandidatesResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelCandidatesQuery {
    /// Location to rank affinity against, usually the draft's location.
    pub location_id: Uuid,
    #[serde(default)]
    pub available_only: bool,
    #[serde(default)]
    pub certified_only: bool,
    #[serde(default)]
    pub mode: RankingMode,
    #[serde(default)]
    pub search: Option<String>,
}

/// GET /api/v1/personnel/candidates
///
/// Ranked candidates against an arbitrary location, used while a draft is
/// still being edited and no job row exists yet.
pub async fn list_candidates(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Query(query): Query<PersonnelCandidatesQuery>,
) -> Result<Json<CandidatesResponse>, ApiError> {
    let pool: Vec<_> = PersonnelRepository::new(state.pool.clone())
        .list_assignable()
        .await?
        .into_iter()
        .map(|entity| entity.into_domain())
        .collect();

    let filters = CandidateQuery {
        available_only: query.available_only,
        certified_only: query.certified_only,
        mode: query.mode,
        search: query.search,
    };
    let candidates = rank_candidates(query.location_id, pool, &filters);
    Ok(Json(CandidatesResponse { candidates }))
}
