//! Location repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LocationEntity;
use crate::metrics::QueryTimer;

/// Repository for location reference data.
#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    /// Creates a new LocationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new location (administrators only).
    pub async fn create(
        &self,
        display_name: &str,
        facility_code: i32,
        address: &str,
    ) -> Result<LocationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_location");

        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            INSERT INTO locations (display_name, facility_code, address)
            VALUES ($1, $2, $3)
            RETURNING id, display_name, facility_code, address, created_at, updated_at
            "#,
        )
        .bind(display_name)
        .bind(facility_code)
        .bind(address)
        .fetch_one(&self.pool)
        .await;

        timer.record();
        result
    }

    /// Find location by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_location_by_id");

        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            SELECT id, display_name, facility_code, address, created_at, updated_at
            FROM locations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        result
    }

    /// List all locations, ordered by facility code.
    pub async fn list(&self) -> Result<Vec<LocationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_locations");

        let result = sqlx::query_as::<_, LocationEntity>(
            r#"
            SELECT id, display_name, facility_code, address, created_at, updated_at
            FROM locations
            ORDER BY facility_code
            "#,
        )
        .fetch_all(&self.pool)
        .await;

        timer.record();
        result
    }
}
