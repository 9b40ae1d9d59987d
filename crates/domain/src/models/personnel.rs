//! Personnel profile domain model.
//!
//! Profiles are managed by a separate staffing system and read-only here;
//! this backend only ranks and assigns them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Staff role eligible for job assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Inspector,
    Supervisor,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Inspector => "inspector",
            StaffRole::Supervisor => "supervisor",
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inspector" => Ok(StaffRole::Inspector),
            "supervisor" => Ok(StaffRole::Supervisor),
            _ => Err(format!(
                "Invalid staff role: {}. Must be one of: inspector, supervisor",
                s
            )),
        }
    }
}

/// Seniority tier used by the `experience` ranking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityTier {
    Junior,
    Mid,
    Senior,
}

impl SeniorityTier {
    /// Numeric rank for sorting: senior > mid > junior.
    pub fn rank(&self) -> u8 {
        match self {
            SeniorityTier::Junior => 0,
            SeniorityTier::Mid => 1,
            SeniorityTier::Senior => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityTier::Junior => "junior",
            SeniorityTier::Mid => "mid",
            SeniorityTier::Senior => "senior",
        }
    }
}

impl std::str::FromStr for SeniorityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(SeniorityTier::Junior),
            "mid" => Ok(SeniorityTier::Mid),
            "senior" => Ok(SeniorityTier::Senior),
            _ => Err(format!(
                "Invalid seniority tier: {}. Must be one of: junior, mid, senior",
                s
            )),
        }
    }
}

/// How candidate lists are ordered within each location band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMode {
    /// Opaque suitability score, descending.
    #[default]
    Recommended,
    /// Seniority tier, descending.
    Experience,
    /// Prior-job count, descending.
    History,
}

/// A staffing profile eligible for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelProfile {
    pub id: Uuid,
    pub name: String,
    pub role: StaffRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    pub is_available: bool,
    pub certified: bool,
    pub seniority: SeniorityTier,
    /// Opaque suitability score maintained by the staffing system.
    pub match_score: i32,
    pub prior_job_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for candidate ranking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateQuery {
    /// Restrict to currently available staff.
    #[serde(default)]
    pub available_only: bool,

    /// Restrict to certified staff.
    #[serde(default)]
    pub certified_only: bool,

    /// Ranking mode within the location-match band.
    #[serde(default)]
    pub mode: RankingMode,

    /// Case-insensitive name search.
    pub search: Option<String>,
}

/// One entry of a ranked candidate list.
///
/// Candidates based at another facility are included with
/// `locationMatch = false` so supervisors can deliberately override when no
/// local staff exist; they are never filtered out on mismatch alone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub profile: PersonnelProfile,
    pub location_match: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_role_round_trip() {
        for role in [StaffRole::Inspector, StaffRole::Supervisor] {
            assert_eq!(role.as_str().parse::<StaffRole>().unwrap(), role);
        }
        assert!("manager".parse::<StaffRole>().is_err());
    }

    #[test]
    fn test_seniority_ordering() {
        assert!(SeniorityTier::Senior.rank() > SeniorityTier::Mid.rank());
        assert!(SeniorityTier::Mid.rank() > SeniorityTier::Junior.rank());
    }

    #[test]
    fn test_ranking_mode_deserialization() {
        let mode: RankingMode = serde_json::from_str("\"experience\"").unwrap();
        assert_eq!(mode, RankingMode::Experience);
        assert_eq!(RankingMode::default(), RankingMode::Recommended);
    }

    #[test]
    fn test_candidate_query_defaults() {
        let query: CandidateQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.available_only);
        assert!(!query.certified_only);
        assert_eq!(query.mode, RankingMode::Recommended);
        assert!(query.search.is_none());
    }
}
