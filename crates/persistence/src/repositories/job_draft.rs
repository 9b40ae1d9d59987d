//! Job draft repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::JobDraftEntity;
use crate::metrics::QueryTimer;

/// Upsert payload for a draft row.
///
/// The autosave scheduler always writes the whole draft: partial writes to
/// a draft row are not part of the persistence contract.
#[derive(Debug, Clone)]
pub struct DraftInput {
    pub owner_id: Uuid,
    pub location_id: Option<Uuid>,
    pub current_tab: String,
    pub form_snapshot: serde_json::Value,
    pub job_number: Option<String>,
    pub needs_reconciliation: bool,
}

/// Repository for job draft database operations.
#[derive(Clone)]
pub struct JobDraftRepository {
    pool: PgPool,
}

impl JobDraftRepository {
    /// Creates a new JobDraftRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new draft row, returning the store-generated identifier.
    ///
    /// The caller captures this identifier and addresses every subsequent
    /// save to it, so a reload resumes the same draft instead of creating
    /// a duplicate.
    pub async fn insert(&self, input: &DraftInput) -> Result<Uuid, sqlx::Error> {
        let timer = QueryTimer::new("insert_draft");

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO job_drafts (
                owner_id, location_id, current_tab, form_snapshot,
                job_number, needs_reconciliation
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.owner_id)
        .bind(input.location_id)
        .bind(&input.current_tab)
        .bind(&input.form_snapshot)
        .bind(&input.job_number)
        .bind(input.needs_reconciliation)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(id)
    }

    /// Update an existing draft row in place.
    ///
    /// Returns false when the row no longer exists (finalized or swept).
    pub async fn update(&self, id: Uuid, input: &DraftInput) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("update_draft");

        let result = sqlx::query(
            r#"
            UPDATE job_drafts
            SET location_id = $2,
                current_tab = $3,
                form_snapshot = $4,
                job_number = $5,
                needs_reconciliation = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(input.location_id)
        .bind(&input.current_tab)
        .bind(&input.form_snapshot)
        .bind(&input.job_number)
        .bind(input.needs_reconciliation)
        .execute(&self.pool)
        .await?;

        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Find draft by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<JobDraftEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_draft_by_id");

        let result = sqlx::query_as::<_, JobDraftEntity>(
            r#"
            SELECT id, owner_id, location_id, current_tab, form_snapshot,
                   job_number, needs_reconciliation, updated_at
            FROM job_drafts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Delete a draft by ID (part of finalization).
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_draft");

        let result = sqlx::query("DELETE FROM job_drafts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        timer.record();
        Ok(result.rows_affected() > 0)
    }

    /// Delete drafts not touched since the cutoff, returning how many rows
    /// were removed. Used by the background sweep that cleans up drafts
    /// orphaned by a failed post-finalize delete or simply abandoned.
    pub async fn delete_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_stale_drafts");

        let result = sqlx::query("DELETE FROM job_drafts WHERE updated_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        timer.record();
        Ok(result.rows_affected())
    }
}
