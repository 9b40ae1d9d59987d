//! Personnel profile repository for database operations.
//!
//! Profiles are independently managed reference data; this repository is
//! read-only.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PersonnelEntity;
use crate::metrics::QueryTimer;

const PERSONNEL_COLUMNS: &str = "id, name, role, location_id, is_available, certified, \
     seniority, match_score, prior_job_count, created_at, updated_at";

/// Repository for personnel profile reads.
#[derive(Clone)]
pub struct PersonnelRepository {
    pool: PgPool,
}

impl PersonnelRepository {
    /// Creates a new PersonnelRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all assignable profiles (inspectors and supervisors), at any
    /// location. Location affinity is a ranking concern, not a filter.
    pub async fn list_assignable(&self) -> Result<Vec<PersonnelEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_assignable_personnel");

        let result = sqlx::query_as::<_, PersonnelEntity>(&format!(
            r#"
            SELECT {PERSONNEL_COLUMNS}
            FROM personnel_profiles
            WHERE role IN ('inspector', 'supervisor')
            ORDER BY name
            "#
        ))
        .fetch_all(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Find profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PersonnelEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_personnel_by_id");

        let result = sqlx::query_as::<_, PersonnelEntity>(&format!(
            "SELECT {PERSONNEL_COLUMNS} FROM personnel_profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        result
    }
}
