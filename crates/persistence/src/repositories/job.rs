//! Job repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::NewJob;

use crate::entities::JobEntity;
use crate::metrics::QueryTimer;

const JOB_COLUMNS: &str = "id, job_number, facility_code, sequence, revision, location_id, \
     location_name, customer_name, customer_contact, status, inspector_ids, \
     supervisor_ids, form_snapshot, created_by, created_at, updated_at";

/// Repository for job database operations.
///
/// Jobs are insert-only in identity: the number and location of a row never
/// change after creation. Status and staffing are the only mutable fields.
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Creates a new JobRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new job row.
    ///
    /// The unique indexes on job_number and (facility_code, sequence,
    /// revision) make a duplicate finalize fail with a conflict instead of
    /// producing a second row.
    pub async fn insert(&self, job: &NewJob) -> Result<JobEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_job");

        let result = sqlx::query_as::<_, JobEntity>(&format!(
            r#"
            INSERT INTO jobs (
                job_number, facility_code, sequence, revision, location_id,
                location_name, customer_name, customer_contact, status,
                inspector_ids, supervisor_ids, form_snapshot, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(job.number.to_string())
        .bind(job.number.facility_code as i32)
        .bind(job.number.sequence)
        .bind(job.number.revision as i32)
        .bind(job.location_id)
        .bind(&job.location_name)
        .bind(&job.customer_name)
        .bind(&job.customer_contact)
        .bind(job.status.as_str())
        .bind(Vec::<Uuid>::new())
        .bind(Vec::<Uuid>::new())
        .bind(&job.form_snapshot)
        .bind(job.created_by)
        .fetch_one(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Find job by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_job_by_id");

        let result = sqlx::query_as::<_, JobEntity>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Next revision for a facility/sequence pair: one past the highest
    /// revision already recorded.
    pub async fn next_revision(
        &self,
        facility_code: i32,
        sequence: i64,
    ) -> Result<i32, sqlx::Error> {
        let timer = QueryTimer::new("next_job_revision");

        let next: i32 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(MAX(revision), 0) + 1
            FROM jobs
            WHERE facility_code = $1 AND sequence = $2
            "#,
        )
        .bind(facility_code)
        .bind(sequence)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(next)
    }

    /// Partial update: status only, keyed by job ID.
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("update_job_status");

        let result = sqlx::query(
            "UPDATE jobs SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Partial update: staffing assignment lists, keyed by job ID.
    pub async fn update_assignments(
        &self,
        id: Uuid,
        inspector_ids: &[Uuid],
        supervisor_ids: &[Uuid],
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("update_job_assignments");

        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET inspector_ids = $2, supervisor_ids = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(inspector_ids)
        .bind(supervisor_ids)
        .execute(&self.pool)
        .await?;

        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
