//! Staff assignment ranking and selection.
//!
//! Given a job's location, candidates are filtered, ranked and selected
//! here. Location affinity always wins: staff based at the job's facility
//! sort strictly before everyone else in every ranking mode. Staff at other
//! facilities stay in the list with a mismatch flag so a supervisor can
//! deliberately override when no local staff exist.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::models::personnel::{
    CandidateQuery, PersonnelProfile, RankedCandidate, RankingMode, StaffRole,
};

/// Error raised when an assignment is hard-blocked.
///
/// Only unavailability blocks an assignment; a location mismatch is a
/// warning, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("{name} is currently unavailable and cannot be assigned")]
    Unavailable { id: Uuid, name: String },
}

/// Filters and ranks the candidate pool for a job location.
///
/// Sort order: location match first, then the mode key descending
/// (`recommended` → match score, `experience` → seniority tier, `history` →
/// prior-job count), then name ascending for determinism.
pub fn rank_candidates(
    job_location_id: Uuid,
    candidates: Vec<PersonnelProfile>,
    query: &CandidateQuery,
) -> Vec<RankedCandidate> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .filter(|profile| !query.available_only || profile.is_available)
        .filter(|profile| !query.certified_only || profile.certified)
        .filter(|profile| match &search {
            Some(needle) => profile.name.to_lowercase().contains(needle),
            None => true,
        })
        .map(|profile| {
            let location_match = profile.location_id == Some(job_location_id);
            RankedCandidate {
                profile,
                location_match,
            }
        })
        .collect();

    ranked.sort_by(|a, b| compare_candidates(a, b, query.mode));
    ranked
}

fn compare_candidates(a: &RankedCandidate, b: &RankedCandidate, mode: RankingMode) -> Ordering {
    // Location-matched candidates sort strictly first.
    b.location_match
        .cmp(&a.location_match)
        .then_with(|| mode_key(&b.profile, mode).cmp(&mode_key(&a.profile, mode)))
        .then_with(|| a.profile.name.cmp(&b.profile.name))
}

fn mode_key(profile: &PersonnelProfile, mode: RankingMode) -> i64 {
    match mode {
        RankingMode::Recommended => profile.match_score as i64,
        RankingMode::Experience => profile.seniority.rank() as i64,
        RankingMode::History => profile.prior_job_count as i64,
    }
}

/// Outcome of a successful assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentOutcome {
    /// The candidate is based at a different facility than the job; the
    /// assignment stands but is surfaced as a warning.
    pub location_mismatch: bool,
    /// The candidate became the job's primary inspector.
    pub primary: bool,
}

/// The staffing selection of one job: ordered inspector and supervisor
/// lists, multi-select for both.
///
/// The first inspector selected is the job's primary; removing the primary
/// promotes the next selected inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentSelection {
    pub inspector_ids: Vec<Uuid>,
    pub supervisor_ids: Vec<Uuid>,
}

impl AssignmentSelection {
    pub fn new(inspector_ids: Vec<Uuid>, supervisor_ids: Vec<Uuid>) -> Self {
        Self {
            inspector_ids,
            supervisor_ids,
        }
    }

    pub fn primary_inspector(&self) -> Option<Uuid> {
        self.inspector_ids.first().copied()
    }

    /// Adds a candidate to the selection.
    ///
    /// Unavailable candidates are hard-blocked. Re-assigning an already
    /// selected candidate is a no-op (but still reports the outcome).
    pub fn assign(
        &mut self,
        profile: &PersonnelProfile,
        job_location_id: Uuid,
    ) -> Result<AssignmentOutcome, AssignmentError> {
        if !profile.is_available {
            return Err(AssignmentError::Unavailable {
                id: profile.id,
                name: profile.name.clone(),
            });
        }

        let location_mismatch = profile.location_id != Some(job_location_id);
        if location_mismatch {
            warn!(
                personnel_id = %profile.id,
                job_location_id = %job_location_id,
                "Assigning staff based at a different facility"
            );
        }

        let list = match profile.role {
            StaffRole::Inspector => &mut self.inspector_ids,
            StaffRole::Supervisor => &mut self.supervisor_ids,
        };
        if !list.contains(&profile.id) {
            list.push(profile.id);
        }

        let primary =
            profile.role == StaffRole::Inspector && self.primary_inspector() == Some(profile.id);

        Ok(AssignmentOutcome {
            location_mismatch,
            primary,
        })
    }

    /// Removes a candidate from the selection, returning whether anything
    /// changed. Removing the primary inspector promotes the next selected
    /// inspector by list order.
    pub fn unassign(&mut self, personnel_id: Uuid, role: StaffRole) -> bool {
        let list = match role {
            StaffRole::Inspector => &mut self.inspector_ids,
            StaffRole::Supervisor => &mut self.supervisor_ids,
        };
        let before = list.len();
        list.retain(|id| *id != personnel_id);
        list.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::personnel::SeniorityTier;
    use chrono::Utc;

    fn profile(
        name: &str,
        role: StaffRole,
        location_id: Option<Uuid>,
        seniority: SeniorityTier,
        match_score: i32,
        prior_job_count: i32,
    ) -> PersonnelProfile {
        PersonnelProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role,
            location_id,
            is_available: true,
            certified: true,
            seniority,
            match_score,
            prior_job_count,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_local_staff_rank_first_in_all_modes() {
        let here = Uuid::new_v4();
        let there = Uuid::new_v4();
        // Remote staff deliberately beat local staff on every mode key.
        let pool = vec![
            profile("Remote Ria", StaffRole::Inspector, Some(there), SeniorityTier::Senior, 99, 500),
            profile("Local Lee", StaffRole::Inspector, Some(here), SeniorityTier::Junior, 1, 0),
            profile("Remote Raj", StaffRole::Inspector, Some(there), SeniorityTier::Senior, 98, 400),
            profile("Local Lou", StaffRole::Inspector, Some(here), SeniorityTier::Junior, 2, 1),
        ];

        for mode in [RankingMode::Recommended, RankingMode::Experience, RankingMode::History] {
            let query = CandidateQuery {
                mode,
                ..Default::default()
            };
            let ranked = rank_candidates(here, pool.clone(), &query);
            assert!(ranked[0].location_match && ranked[1].location_match, "{:?}", mode);
            assert!(!ranked[2].location_match && !ranked[3].location_match, "{:?}", mode);
        }
    }

    #[test]
    fn test_recommended_mode_sorts_by_match_score() {
        let here = Uuid::new_v4();
        let pool = vec![
            profile("Ana", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 40, 0),
            profile("Ben", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 80, 0),
        ];
        let ranked = rank_candidates(here, pool, &CandidateQuery::default());
        assert_eq!(ranked[0].profile.name, "Ben");
        assert_eq!(ranked[1].profile.name, "Ana");
    }

    #[test]
    fn test_experience_mode_sorts_by_seniority() {
        let here = Uuid::new_v4();
        let pool = vec![
            profile("Ana", StaffRole::Inspector, Some(here), SeniorityTier::Junior, 99, 0),
            profile("Ben", StaffRole::Inspector, Some(here), SeniorityTier::Senior, 1, 0),
            profile("Cas", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 50, 0),
        ];
        let query = CandidateQuery {
            mode: RankingMode::Experience,
            ..Default::default()
        };
        let names: Vec<_> = rank_candidates(here, pool, &query)
            .into_iter()
            .map(|c| c.profile.name)
            .collect();
        assert_eq!(names, ["Ben", "Cas", "Ana"]);
    }

    #[test]
    fn test_history_mode_sorts_by_prior_jobs() {
        let here = Uuid::new_v4();
        let pool = vec![
            profile("Ana", StaffRole::Supervisor, Some(here), SeniorityTier::Mid, 0, 3),
            profile("Ben", StaffRole::Supervisor, Some(here), SeniorityTier::Mid, 0, 12),
        ];
        let query = CandidateQuery {
            mode: RankingMode::History,
            ..Default::default()
        };
        let ranked = rank_candidates(here, pool, &query);
        assert_eq!(ranked[0].profile.name, "Ben");
    }

    #[test]
    fn test_tie_break_by_name_ascending() {
        let here = Uuid::new_v4();
        let pool = vec![
            profile("Zoe", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 50, 0),
            profile("Abe", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 50, 0),
        ];
        let ranked = rank_candidates(here, pool, &CandidateQuery::default());
        assert_eq!(ranked[0].profile.name, "Abe");
        assert_eq!(ranked[1].profile.name, "Zoe");
    }

    #[test]
    fn test_filters_and_search() {
        let here = Uuid::new_v4();
        let mut unavailable =
            profile("Busy Bea", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 50, 0);
        unavailable.is_available = false;
        let mut uncertified =
            profile("New Ned", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 50, 0);
        uncertified.certified = false;
        let pool = vec![
            unavailable,
            uncertified,
            profile("Ready Rae", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 50, 0),
        ];

        let query = CandidateQuery {
            available_only: true,
            certified_only: true,
            ..Default::default()
        };
        let ranked = rank_candidates(here, pool.clone(), &query);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].profile.name, "Ready Rae");

        let query = CandidateQuery {
            search: Some("ned".to_string()),
            ..Default::default()
        };
        let ranked = rank_candidates(here, pool, &query);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].profile.name, "New Ned");
    }

    #[test]
    fn test_mismatched_candidates_are_flagged_not_dropped() {
        let here = Uuid::new_v4();
        let pool = vec![profile(
            "Far Fay",
            StaffRole::Inspector,
            Some(Uuid::new_v4()),
            SeniorityTier::Mid,
            50,
            0,
        )];
        let ranked = rank_candidates(here, pool, &CandidateQuery::default());
        assert_eq!(ranked.len(), 1);
        assert!(!ranked[0].location_match);
    }

    #[test]
    fn test_assign_unavailable_is_hard_blocked() {
        let here = Uuid::new_v4();
        let mut selection = AssignmentSelection::default();
        let mut busy = profile("Busy Bea", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 0, 0);
        busy.is_available = false;
        let err = selection.assign(&busy, here).unwrap_err();
        assert!(matches!(err, AssignmentError::Unavailable { .. }));
        assert!(selection.inspector_ids.is_empty());
    }

    #[test]
    fn test_assign_mismatch_proceeds_with_warning() {
        let here = Uuid::new_v4();
        let mut selection = AssignmentSelection::default();
        let far = profile("Far Fay", StaffRole::Inspector, Some(Uuid::new_v4()), SeniorityTier::Mid, 0, 0);
        let outcome = selection.assign(&far, here).unwrap();
        assert!(outcome.location_mismatch);
        assert_eq!(selection.inspector_ids, vec![far.id]);
    }

    #[test]
    fn test_first_inspector_is_primary() {
        let here = Uuid::new_v4();
        let mut selection = AssignmentSelection::default();
        let first = profile("Ana", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 0, 0);
        let second = profile("Ben", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 0, 0);

        assert!(selection.assign(&first, here).unwrap().primary);
        assert!(!selection.assign(&second, here).unwrap().primary);
        assert_eq!(selection.primary_inspector(), Some(first.id));
    }

    #[test]
    fn test_removing_primary_promotes_next() {
        let here = Uuid::new_v4();
        let mut selection = AssignmentSelection::default();
        let first = profile("Ana", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 0, 0);
        let second = profile("Ben", StaffRole::Inspector, Some(here), SeniorityTier::Mid, 0, 0);
        selection.assign(&first, here).unwrap();
        selection.assign(&second, here).unwrap();

        assert!(selection.unassign(first.id, StaffRole::Inspector));
        assert_eq!(selection.primary_inspector(), Some(second.id));

        assert!(selection.unassign(second.id, StaffRole::Inspector));
        assert_eq!(selection.primary_inspector(), None);
        // Removing someone who is not selected changes nothing.
        assert!(!selection.unassign(second.id, StaffRole::Inspector));
    }

    #[test]
    fn test_assign_is_idempotent() {
        let here = Uuid::new_v4();
        let mut selection = AssignmentSelection::default();
        let sup = profile("Sam", StaffRole::Supervisor, Some(here), SeniorityTier::Senior, 0, 0);
        selection.assign(&sup, here).unwrap();
        selection.assign(&sup, here).unwrap();
        assert_eq!(selection.supervisor_ids, vec![sup.id]);
    }
}
