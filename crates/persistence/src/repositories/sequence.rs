//! Sequence counter repository.
//!
//! One counter row exists per facility code. The counter is the only
//! resource shared across client sessions, so it is mutated exclusively
//! through the atomic increment below; a client-side read-then-write would
//! reintroduce the duplicate-number race this design exists to prevent.

use sqlx::PgPool;
use tracing::debug;

use crate::metrics::QueryTimer;

/// Repository for per-facility sequence counters.
#[derive(Clone)]
pub struct SequenceRepository {
    pool: PgPool,
}

impl SequenceRepository {
    /// Creates a new SequenceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Issues the next sequence number for a facility.
    ///
    /// Read-and-increment happens as one atomic statement, so concurrent
    /// callers for the same facility can never observe the same value.
    /// Counters are monotonic and never reused, even when the job that
    /// consumed a number is later deleted.
    pub async fn next_sequence(&self, facility_code: i32) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("next_sequence");

        let issued: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO sequence_counters (facility_code, last_issued)
            VALUES ($1, 1)
            ON CONFLICT (facility_code)
            DO UPDATE SET last_issued = sequence_counters.last_issued + 1
            RETURNING last_issued
            "#,
        )
        .bind(facility_code)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        debug!(facility_code, issued, "Issued sequence number");
        Ok(issued)
    }

    /// Reads the last issued sequence without incrementing (reporting only).
    pub async fn last_issued(&self, facility_code: i32) -> Result<Option<i64>, sqlx::Error> {
        let timer = QueryTimer::new("last_issued_sequence");

        let result = sqlx::query_scalar(
            "SELECT last_issued FROM sequence_counters WHERE facility_code = $1",
        )
        .bind(facility_code)
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        result
    }
}
