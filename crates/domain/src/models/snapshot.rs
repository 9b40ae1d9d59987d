//! Boundary-typed inspection form snapshot.
//!
//! Drafts and finalized jobs both carry the in-progress form as structured
//! data. Everything crossing the persistence or HTTP boundary is
//! deserialized into [`FormSnapshot`] first; a payload whose shape does not
//! match the form schema is an explicit parse error, never passed through
//! unchecked.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a stored or submitted snapshot does not match the
/// form schema.
#[derive(Debug, Error)]
#[error("malformed form snapshot: {0}")]
pub struct SnapshotParseError(#[from] serde_json::Error);

/// Customer block of the inspection form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub purchase_order: Option<String>,
}

/// One part entry on the inspection form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartEntry {
    pub number: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<i64>,
}

/// The full inspection form as captured by the draft editor.
///
/// All fields default so a snapshot can grow incrementally as the user
/// fills in the form; the legacy flat `customerName`/`customerContact`
/// fields are still accepted from older clients (see the field-priority
/// resolver in `services::job_assembly`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSnapshot {
    pub customer: CustomerInfo,
    pub parts: Vec<PartEntry>,
    pub emergency_procedures: Option<String>,
    pub notes: Option<String>,

    /// Legacy flat customer name, superseded by `customer.name`.
    pub customer_name: Option<String>,
    /// Legacy flat customer contact, superseded by `customer.contact`.
    pub customer_contact: Option<String>,
}

impl FormSnapshot {
    /// Parses a snapshot from its stored JSON form.
    pub fn parse(value: &serde_json::Value) -> Result<Self, SnapshotParseError> {
        serde_json::from_value(value.clone()).map_err(Into::into)
    }

    /// Serializes the snapshot back to its stored JSON form.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Effective customer name: the customer block wins over the legacy
    /// flat field; whitespace-only names count as absent.
    pub fn effective_customer_name(&self) -> Option<&str> {
        self.customer
            .name
            .as_deref()
            .or(self.customer_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Effective customer contact, with the same precedence as the name.
    pub fn effective_customer_contact(&self) -> Option<&str> {
        self.customer
            .contact
            .as_deref()
            .or(self.customer_contact.as_deref())
            .map(str::trim)
            .filter(|contact| !contact.is_empty())
    }

    /// True when at least one part entry carries a number or a name.
    pub fn has_part_identifier(&self) -> bool {
        self.parts.iter().any(|part| {
            part.number.as_deref().is_some_and(|n| !n.trim().is_empty())
                || part.name.as_deref().is_some_and(|n| !n.trim().is_empty())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty_object() {
        let snapshot = FormSnapshot::parse(&json!({})).unwrap();
        assert_eq!(snapshot, FormSnapshot::default());
        assert!(snapshot.effective_customer_name().is_none());
        assert!(!snapshot.has_part_identifier());
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(FormSnapshot::parse(&json!({ "customer": "Acme" })).is_err());
        assert!(FormSnapshot::parse(&json!({ "parts": { "number": "P-1" } })).is_err());
        assert!(FormSnapshot::parse(&json!("just a string")).is_err());
    }

    #[test]
    fn test_customer_name_precedence() {
        let snapshot = FormSnapshot::parse(&json!({
            "customer": { "name": "Acme Industries" },
            "customerName": "Old Acme"
        }))
        .unwrap();
        assert_eq!(snapshot.effective_customer_name(), Some("Acme Industries"));

        let legacy = FormSnapshot::parse(&json!({ "customerName": "Old Acme" })).unwrap();
        assert_eq!(legacy.effective_customer_name(), Some("Old Acme"));
    }

    #[test]
    fn test_blank_customer_name_counts_as_absent() {
        let snapshot = FormSnapshot::parse(&json!({
            "customer": { "name": "   " }
        }))
        .unwrap();
        assert!(snapshot.effective_customer_name().is_none());
    }

    #[test]
    fn test_has_part_identifier() {
        let with_number = FormSnapshot::parse(&json!({
            "parts": [{ "number": "P-100" }]
        }))
        .unwrap();
        assert!(with_number.has_part_identifier());

        let with_name = FormSnapshot::parse(&json!({
            "parts": [{ "name": "impeller housing" }]
        }))
        .unwrap();
        assert!(with_name.has_part_identifier());

        let quantity_only = FormSnapshot::parse(&json!({
            "parts": [{ "quantity": 12 }]
        }))
        .unwrap();
        assert!(!quantity_only.has_part_identifier());
    }

    #[test]
    fn test_round_trip_through_value() {
        let snapshot = FormSnapshot {
            customer: CustomerInfo {
                name: Some("Acme".to_string()),
                ..Default::default()
            },
            parts: vec![PartEntry {
                number: Some("P-7".to_string()),
                name: None,
                quantity: Some(3),
            }],
            emergency_procedures: Some("muster at dock B".to_string()),
            ..Default::default()
        };
        let restored = FormSnapshot::parse(&snapshot.to_value()).unwrap();
        assert_eq!(restored, snapshot);
    }
}
