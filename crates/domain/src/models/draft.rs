//! Job draft domain model.
//!
//! A draft is the in-progress, mutable, resumable form state of a job that
//! has not been finalized yet. Exactly one live row exists per in-progress
//! job, owned by the creating user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::job_number::JobNumberSlot;
use super::snapshot::FormSnapshot;

/// A persisted draft row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub location_id: Option<Uuid>,
    pub current_tab: String,
    pub form_snapshot: serde_json::Value,
    pub job_number: Option<String>,
    pub needs_reconciliation: bool,
    pub updated_at: DateTime<Utc>,
}

/// The buffered, not-necessarily-persisted state of a draft editor.
///
/// This is what the autosave scheduler writes: the persistence layer only
/// ever sees a consistent whole-draft payload, never partial field writes.
#[derive(Debug, Clone)]
pub struct DraftState {
    pub owner_id: Uuid,
    pub location_id: Option<Uuid>,
    pub current_tab: String,
    pub form_snapshot: FormSnapshot,
    pub job_number: Option<JobNumberSlot>,
    pub needs_reconciliation: bool,
}

impl DraftState {
    /// Tab shown when a fresh draft is opened.
    pub const DEFAULT_TAB: &'static str = "customer";

    pub fn new(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            location_id: None,
            current_tab: Self::DEFAULT_TAB.to_string(),
            form_snapshot: FormSnapshot::default(),
            job_number: None,
            needs_reconciliation: false,
        }
    }

    /// Minimum-content predicate guarding every persisted write.
    ///
    /// A draft is worth saving once the customer name is filled in, at
    /// least one part entry carries a number or name, or a location has
    /// been selected. Drafts with none of these are never persisted, so
    /// the store does not accumulate empty noise.
    pub fn is_save_worthy(&self) -> bool {
        self.location_id.is_some()
            || self.form_snapshot.effective_customer_name().is_some()
            || self.form_snapshot.has_part_identifier()
    }
}

/// Request payload for a draft form mutation.
///
/// Both fields are optional: a keystroke replaces the snapshot, a location
/// pick sets `locationId` (and triggers job number allocation).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftRequest {
    pub form_snapshot: Option<serde_json::Value>,
    pub location_id: Option<Uuid>,
}

/// Request payload for an active-tab change.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetTabRequest {
    #[validate(custom(function = "shared::validation::validate_tab_id"))]
    pub tab: String,
}

/// Current editor state returned to clients.
///
/// `draftId` is the resumable reference: present once the first save has
/// succeeded, it lets a reload resume the same draft instead of creating a
/// duplicate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftStateResponse {
    pub editor_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<Uuid>,
    pub owner_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    pub current_tab: String,
    pub form_snapshot: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_number: Option<String>,
    pub needs_reconciliation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Set when autosave has failed repeatedly and the user should be
    /// warned that recent edits may not be persisted.
    pub save_degraded: bool,
    /// Non-blocking advisory, e.g. a placeholder job number was assigned
    /// because the sequence counter was unavailable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::snapshot::{CustomerInfo, PartEntry};

    #[test]
    fn test_new_draft_is_not_save_worthy() {
        let state = DraftState::new(Uuid::new_v4());
        assert!(!state.is_save_worthy());
        assert_eq!(state.current_tab, "customer");
    }

    #[test]
    fn test_customer_name_makes_draft_save_worthy() {
        let mut state = DraftState::new(Uuid::new_v4());
        state.form_snapshot.customer = CustomerInfo {
            name: Some("Acme Industries".to_string()),
            ..Default::default()
        };
        assert!(state.is_save_worthy());
    }

    #[test]
    fn test_part_entry_makes_draft_save_worthy() {
        let mut state = DraftState::new(Uuid::new_v4());
        state.form_snapshot.parts = vec![PartEntry {
            number: Some("P-100".to_string()),
            ..Default::default()
        }];
        assert!(state.is_save_worthy());
    }

    #[test]
    fn test_location_makes_draft_save_worthy() {
        let mut state = DraftState::new(Uuid::new_v4());
        state.location_id = Some(Uuid::new_v4());
        assert!(state.is_save_worthy());
    }

    #[test]
    fn test_emergency_procedures_alone_is_not_save_worthy() {
        let mut state = DraftState::new(Uuid::new_v4());
        state.form_snapshot.emergency_procedures =
            Some("evacuate via dock B, muster at gate 3".to_string());
        assert!(!state.is_save_worthy());
    }

    #[test]
    fn test_set_tab_request_validation() {
        use validator::Validate;
        let ok = SetTabRequest {
            tab: "part-details".to_string(),
        };
        assert!(ok.validate().is_ok());
        let bad = SetTabRequest {
            tab: "Part Details".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
