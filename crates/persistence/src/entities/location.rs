//! Location entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the locations table.
#[derive(Debug, Clone, FromRow)]
pub struct LocationEntity {
    pub id: Uuid,
    pub display_name: String,
    pub facility_code: i32,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocationEntity {
    /// Convert to domain model.
    pub fn into_domain(self) -> domain::models::Location {
        domain::models::Location {
            id: self.id,
            display_name: self.display_name,
            facility_code: self.facility_code,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
