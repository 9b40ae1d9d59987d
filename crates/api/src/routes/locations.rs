//! Facility location endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use domain::models::location::{CreateLocationRequest, Location};
use persistence::repositories::LocationRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::session::SessionExtractor;

/// GET /api/v1/locations
pub async fn list_locations(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
) -> Result<Json<Vec<Location>>, ApiError> {
    let locations = LocationRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(|entity| entity.into_domain())
        .collect();
    Ok(Json(locations))
}

/// GET /api/v1/locations/:location_id
pub async fn get_location(
    State(state): State<AppState>,
    SessionExtractor(_session): SessionExtractor,
    Path(location_id): Path<Uuid>,
) -> Result<Json<Location>, ApiError> {
    let location = LocationRepository::new(state.pool.clone())
        .find_by_id(location_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Location not found".into()))?;
    Ok(Json(location.into_domain()))
}

/// POST /api/v1/locations
///
/// Admin only. The facility code is the job number prefix and must be
/// unique; a duplicate surfaces as 409.
pub async fn create_location(
    State(state): State<AppState>,
    SessionExtractor(session): SessionExtractor,
    Json(request): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<Location>), ApiError> {
    if !session.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can manage locations".into(),
        ));
    }
    request.validate()?;

    let location = LocationRepository::new(state.pool.clone())
        .create(
            request.display_name.trim(),
            request.facility_code,
            request.address.trim(),
        )
        .await?
        .into_domain();
    info!(
        location_id = %location.id,
        facility_code = location.facility_code,
        "Location created"
    );

    Ok((StatusCode::CREATED, Json(location)))
}
