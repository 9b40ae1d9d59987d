//! Location domain model.
//!
//! Locations are immutable reference data: created and edited only by
//! administrators, consumed by everything else. The facility code is the
//! numeric prefix of every job number allocated at that location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a facility location record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Uuid,
    pub display_name: String,
    pub facility_code: i32,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a location (administrators only).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[validate(custom(function = "shared::validation::validate_display_name"))]
    pub display_name: String,

    #[validate(custom(function = "shared::validation::validate_facility_code"))]
    pub facility_code: i32,

    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: String,
}
