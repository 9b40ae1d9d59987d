//! Per-request session identity.
//!
//! The identity provider is an external collaborator; this backend only
//! consumes `{userId, role}`. A [`Session`] is built once per request by
//! the API layer and passed explicitly into every operation that needs it,
//! never cached in shared mutable state.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role supplied by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Staff,
    Admin,
}

impl SessionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRole::Staff => "staff",
            SessionRole::Admin => "admin",
        }
    }
}

impl fmt::Display for SessionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(SessionRole::Staff),
            "admin" => Ok(SessionRole::Admin),
            _ => Err(format!("Invalid session role: {}. Must be one of: staff, admin", s)),
        }
    }
}

/// The authenticated identity of the current request.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_id: Uuid,
    pub role: SessionRole,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }

    /// A draft is owned by its creating user until finalized or abandoned;
    /// only the owner or an administrator may act on it.
    pub fn can_access_draft(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [SessionRole::Staff, SessionRole::Admin] {
            assert_eq!(role.as_str().parse::<SessionRole>().unwrap(), role);
        }
        assert!("manager".parse::<SessionRole>().is_err());
    }

    #[test]
    fn test_owner_access() {
        let owner = Uuid::new_v4();
        let session = Session {
            user_id: owner,
            role: SessionRole::Staff,
        };
        assert!(session.can_access_draft(owner));
        assert!(!session.can_access_draft(Uuid::new_v4()));
    }

    #[test]
    fn test_admin_access() {
        let session = Session {
            user_id: Uuid::new_v4(),
            role: SessionRole::Admin,
        };
        assert!(session.can_access_draft(Uuid::new_v4()));
    }
}
