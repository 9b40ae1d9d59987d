//! Session extractor.
//!
//! Authentication is owned by an upstream identity provider; the gateway
//! forwards the verified identity as `X-User-Id` and `X-User-Role`
//! headers. This extractor turns them into an explicit [`Session`] value
//! that handlers pass into domain operations, so no identity state is ever
//! cached between requests.

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use domain::models::{Session, SessionRole};

use crate::error::ApiError;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Wrapper so `Session` can be used as an axum extractor.
#[derive(Debug, Clone, Copy)]
pub struct SessionExtractor(pub Session);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = header_value(parts, USER_ID_HEADER)?
            .parse::<Uuid>()
            .map_err(|_| ApiError::Unauthorized("Malformed user id header".into()))?;

        let role = header_value(parts, USER_ROLE_HEADER)?
            .parse::<SessionRole>()
            .map_err(ApiError::Unauthorized)?;

        Ok(SessionExtractor(Session { user_id, role }))
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized(format!("Missing {} header", name)))
}
