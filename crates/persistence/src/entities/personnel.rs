//! Personnel profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use domain::models::{SeniorityTier, StaffRole};

/// Database row mapping for the personnel_profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct PersonnelEntity {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub location_id: Option<Uuid>,
    pub is_available: bool,
    pub certified: bool,
    pub seniority: String,
    pub match_score: i32,
    pub prior_job_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonnelEntity {
    /// Convert to domain model.
    ///
    /// Unrecognized stored role or seniority values fall back to the
    /// least-privileged tier with a warning rather than failing the row.
    pub fn into_domain(self) -> domain::models::PersonnelProfile {
        let role = self.role.parse::<StaffRole>().unwrap_or_else(|_| {
            warn!(
                personnel_id = %self.id,
                role = %self.role,
                "Unrecognized staff role in database; falling back to inspector"
            );
            StaffRole::Inspector
        });
        let seniority = self.seniority.parse::<SeniorityTier>().unwrap_or_else(|_| {
            warn!(
                personnel_id = %self.id,
                seniority = %self.seniority,
                "Unrecognized seniority tier in database; falling back to junior"
            );
            SeniorityTier::Junior
        });

        domain::models::PersonnelProfile {
            id: self.id,
            name: self.name,
            role,
            location_id: self.location_id,
            is_available: self.is_available,
            certified: self.certified,
            seniority,
            match_score: self.match_score,
            prior_job_count: self.prior_job_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(role: &str, seniority: &str) -> PersonnelEntity {
        PersonnelEntity {
            id: Uuid::new_v4(),
            name: "Dana Reed".to_string(),
            role: role.to_string(),
            location_id: None,
            is_available: true,
            certified: true,
            seniority: seniority.to_string(),
            match_score: 0,
            prior_job_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_role_and_seniority_map_to_domain() {
        let profile = entity("supervisor", "senior").into_domain();
        assert_eq!(profile.role, StaffRole::Supervisor);
        assert_eq!(profile.seniority, SeniorityTier::Senior);
    }

    #[test]
    fn test_unrecognized_role_and_seniority_fall_back() {
        let profile = entity("manager", "distinguished").into_domain();
        assert_eq!(profile.role, StaffRole::Inspector);
        assert_eq!(profile.seniority, SeniorityTier::Junior);
    }
}
